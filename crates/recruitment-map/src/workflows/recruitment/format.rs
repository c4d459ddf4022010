//! pt-BR rendering helpers shared by reports and job postings.

use chrono::{DateTime, NaiveDate, Utc};

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// `1234.5` renders as `R$ 1.234,50`.
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

/// Score without a trailing `.0` for whole values.
pub fn format_score(score: f32) -> String {
    score.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_day_first() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
        assert_eq!(format_date(date), "05/01/2026");
    }

    #[test]
    fn currency_groups_thousands_with_dots() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(950.5), "R$ 950,50");
        assert_eq!(format_brl(5000.0), "R$ 5.000,00");
        assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(-42.0), "-R$ 42,00");
    }

    #[test]
    fn scores_drop_trailing_zero() {
        assert_eq!(format_score(8.0), "8");
        assert_eq!(format_score(7.5), "7.5");
    }
}
