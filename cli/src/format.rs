//! Plain-text number formatting for table output.

use tally_core::Metric;

pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_metric(metric: Metric) -> String {
    match metric.value() {
        Some(v) if v.abs() >= 1000.0 => format_thousands(v.round() as i64),
        Some(v) => format!("{v:.1}"),
        None => "--".to_string(),
    }
}
