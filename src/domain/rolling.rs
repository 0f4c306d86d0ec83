//! Rolling-window statistics over a value slice.
//!
//! Single-pass running-sum implementations; every derived series in the
//! crate (moving averages, RSI gain/loss means, Bollinger bands) is built
//! on these two functions. Output is aligned to the input: index i holds
//! the statistic of the window ending at i, `None` during warmup.

/// Rolling mean over `window` values.
///
/// MEAN(n)[i] = sum(V[i-n+1..=i]) / n
/// Warmup: first (n-1) entries are `None`. A window of 0 or one longer
/// than the input yields all `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || window > values.len() {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }

    out
}

/// Rolling sample standard deviation over `window` values.
///
/// VAR(n)[i] = (sumsq - sum^2 / n) / (n - 1), floored at zero before the
/// square root to absorb round-off on near-constant windows.
/// Warmup: first (n-1) entries are `None`. A sample deviation needs at
/// least two observations, so window < 2 yields all `None`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 || window > values.len() {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut sumsq = 0.0;

    for (i, &v) in values.iter().enumerate() {
        sum += v;
        sumsq += v * v;
        if i >= window {
            let old = values[i - window];
            sum -= old;
            sumsq -= old * old;
        }
        if i + 1 >= window {
            let n = window as f64;
            let variance = ((sumsq - sum * sum / n) / (n - 1.0)).max(0.0);
            out.push(Some(variance.sqrt()));
        } else {
            out.push(None);
        }
    }

    out
}
