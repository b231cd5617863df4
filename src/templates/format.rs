// templates/format.rs
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// US dollars with thousands separators, rounded to cents: `$1,500.00`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }
    let cents = format!("{:.2}", amount.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}

/// `M/d/yyyy`, or `N/A` when there is no date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => "N/A".to_string(),
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    format_date(Some(at.date_naive()))
}
