//! Cross-sectional statistics.

/// Quantile with linear interpolation between order statistics.
///
/// `q` is a fraction; out-of-range values are clamped to [0, 1]. An empty
/// input has no quantile.
pub fn quantile(mut values: Vec<f64>, q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let h = (values.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(values[lo] + (h - lo as f64) * (values[hi] - values[lo]))
}
