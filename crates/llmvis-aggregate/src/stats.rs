//! Statistical helpers: smoothing, confidence intervals, dispersion.

/// z value for a 95% two-sided interval.
const Z_95: f64 = 1.96;

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = values.len() as f64;
    values.iter().sum::<f64>() / denom
}

/// Population standard deviation; `0.0` for fewer than two values.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    #[allow(clippy::cast_precision_loss)]
    let denom = values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / denom;
    variance.sqrt()
}

/// Coefficient of variation (σ/μ) across brand values for one metric.
///
/// `None` when the mean is zero or negative, where the ratio carries no
/// signal.
#[must_use]
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let m = mean(values);
    if m <= 0.0 {
        return None;
    }
    Some(std_dev(values) / m)
}

/// Pull a raw percentage toward a neutral prior in proportion to the
/// sampling deficit.
///
/// With `n >= min_sample` the raw value passes through unchanged; below
/// that, the missing share of the minimum sample is filled with the
/// prior: `(raw * n + prior * (min - n)) / min`.
#[must_use]
pub fn smooth_toward_prior(raw: f64, n: usize, min_sample: usize, prior: f64) -> f64 {
    if n >= min_sample || min_sample == 0 {
        return raw;
    }
    #[allow(clippy::cast_precision_loss)]
    let (n_f, min_f) = (n as f64, min_sample as f64);
    (raw * n_f + prior * (min_f - n_f)) / min_f
}

/// 95% binomial-proportion confidence interval on the 0-100 scale.
///
/// `p_hat` is the observed proportion in `[0, 1]`. Returns `(0, 0)` for
/// an empty sample; bounds are clamped into `[0, 100]`.
#[must_use]
pub fn binomial_ci(p_hat: f64, n: usize) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }
    let p = p_hat.clamp(0.0, 1.0);
    #[allow(clippy::cast_precision_loss)]
    let n_f = n as f64;
    let standard_error = (p * (1.0 - p) / n_f).sqrt();
    let low = ((p - Z_95 * standard_error) * 100.0).clamp(0.0, 100.0);
    let high = ((p + Z_95 * standard_error) * 100.0).clamp(0.0, 100.0);
    (low, high)
}
