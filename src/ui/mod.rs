pub mod charts;
pub mod panels;
pub mod table;

/// `1234567.891` → `"1,234,568"`. Non-finite values render as `"–"`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals with grouped thousands.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let cents = (value.abs() * 100.0).round();
    let whole = format_thousands((cents / 100.0).trunc());
    let frac = (cents % 100.0) as u64;
    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}{whole}.{frac:02}")
}
