use chrono::NaiveDate;

/// Whole nights between two dates. Zero or negative when the dates are
/// equal or reversed; callers reject those before booking, but the value
/// itself never errors so a live price preview stays cheap.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Total price for a stay. Non-positive night counts price at zero rather
/// than erroring.
pub fn compute_total(nights: i64, nightly_rate: f64) -> f64 {
    if nights > 0 {
        nights as f64 * nightly_rate
    } else {
        0.0
    }
}
