use chrono::{DateTime, NaiveDate};

pub const CURRENCY_SYMBOL: &str = "S$";

/// `S$284,500` for whole amounts, `S$2,845.50` otherwise.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);

    match cents % 100 {
        0 => format!("{}{}{}", sign, CURRENCY_SYMBOL, whole),
        frac => format!("{}{}{}.{:02}", sign, CURRENCY_SYMBOL, whole, frac),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// `Saturday, March 15, 2025`. Input that is not an ISO date comes back unchanged.
pub fn format_long_date(value: &str) -> String {
    match parse_date(value.trim()) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => value.to_string(),
    }
}
