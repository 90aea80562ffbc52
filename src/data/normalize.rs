use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Field cleanup applied to every ingested row
// ---------------------------------------------------------------------------

static ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(.*?\)").unwrap());

/// Strip point-deduction annotations such as `"Everton (-8)"` → `"Everton"`.
pub fn clean_team_name(raw: &str) -> String {
    ANNOTATION.replace_all(raw, "").trim().to_string()
}

/// Parse a points cell. Anything that is not a finite number becomes `0.0`,
/// and a total pushed below zero by deductions is floored at `0.0`.
pub fn coerce_points(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.max(0.0),
        _ => 0.0,
    }
}
