//! Display formatting for financial figures

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Whole-dollar USD with thousands separators: `$12,346`, `-$1,000`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Short month name for a `YYYY-MM` string. Unparseable input is returned as-is.
pub fn format_month_name(month: &str) -> String {
    month
        .split('-')
        .nth(1)
        .and_then(|m| m.parse::<usize>().ok())
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTHS.get(idx))
        .map(|name| name.to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Signed one-decimal percentage: `+12.5%`, `-3.0%`.
pub fn format_percent_change(change: f64) -> String {
    // -0.0 would otherwise render as "+-0.0%"
    let change = if change == 0.0 { 0.0 } else { change };
    if change >= 0.0 {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(12345.6), "$12,346");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
        assert_eq!(format_currency(-1000.0), "-$1,000");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn test_format_month_name() {
        assert_eq!(format_month_name("2024-03"), "Mar");
        assert_eq!(format_month_name("2023-12"), "Dec");
        assert_eq!(format_month_name("2023-13"), "2023-13");
        assert_eq!(format_month_name("March"), "March");
    }

    #[test]
    fn test_format_percent_change() {
        assert_eq!(format_percent_change(12.345), "+12.3%");
        assert_eq!(format_percent_change(0.0), "+0.0%");
        assert_eq!(format_percent_change(-0.0), "+0.0%");
        assert_eq!(format_percent_change(-3.0), "-3.0%");
    }
}
