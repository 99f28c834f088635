//! Number formatting for table output.

/// `$1,234,567.89`, with a leading minus for negative amounts.
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return String::from("n/a");
    }
    let cents = (value.abs() * 100.0).round() as u128;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Whole-number count with thousands separators.
pub fn count(value: f64) -> String {
    if !value.is_finite() {
        return String::from("n/a");
    }
    let whole = value.abs().round() as u128;
    let sign = if value < 0.0 && whole > 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(whole))
}

/// `0.07` as `7.00%`.
pub fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
