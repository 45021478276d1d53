use chrono::NaiveDate;

/// Chart label for a snapshot month: abbreviated month + 2-digit year ("Jan 26").
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %y").to_string()
}

/// Format a value in whole currency units with thousands separators.
///
/// USD renders as `$12,800`; other codes as `EUR 12,800`. Negative values
/// carry a leading minus (`-$2,100`).
pub fn format_currency(value: f64, currency: &str) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let grouped = group_thousands(&format!("{:.0}", rounded.abs()));

    if currency.eq_ignore_ascii_case("USD") {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}{} {grouped}", currency.to_uppercase())
    }
}

/// Like [`format_currency`], with an explicit `+` on non-negative values.
pub fn format_signed_currency(value: f64, currency: &str) -> String {
    let formatted = format_currency(value, currency);
    if value.round() >= 0.0 {
        format!("+{formatted}")
    } else {
        formatted
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
