use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For EUR/USD, 1 unit = 100 cents, so $15.49 = 1549 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount.
/// Example: 1549 -> "15.49", -1 -> "-0.01"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format a percentage with one decimal place.
/// Example: 60.7927 -> "60.8%"
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// Parse a decimal string into cents.
/// Example: "15.49" -> 1549, "9.9" -> 990, "12" -> 1200
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units = parse_digits(units_str)?;

    // Pad to two digits, truncate anything past the cent
    let decimal_cents = match decimal_str.len() {
        0 => 0,
        1 => parse_digits(decimal_str)? * 10,
        _ => {
            parse_digits(decimal_str)?;
            parse_digits(&decimal_str[..2])?
        }
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::Overflow)?;
    Ok(if negative { -cents } else { cents })
}

fn parse_digits(s: &str) -> Result<i64, ParseCentsError> {
    if s.is_empty() {
        return Ok(0);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    s.parse().map_err(|_| ParseCentsError::Overflow)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
