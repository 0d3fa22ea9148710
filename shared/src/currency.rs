//! Brazilian real text handling for monetary fields.
//!
//! Amounts travel in two shapes: canonical dot-decimal text (`"1234.56"`)
//! for the wire, and pt-BR currency text (`"R$ 1.234,56"`) for people.
//! Nothing in here fails: text that cannot be read as an amount degrades
//! to an empty canonical string or to [`ZERO_DISPLAY`].

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// What every absent or unreadable amount renders as.
pub const ZERO_DISPLAY: &str = "R$ 0,00";

const CURRENCY_SYMBOL: &str = "R$";
const GROUPING_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// A value handed to [`to_display`]: a number, some text, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput<'a> {
    Number(f64),
    Text(&'a str),
    Absent,
}

impl From<f64> for AmountInput<'_> {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl<'a> From<&'a str> for AmountInput<'a> {
    fn from(value: &'a str) -> Self {
        AmountInput::Text(value)
    }
}

impl<'a> From<&'a String> for AmountInput<'a> {
    fn from(value: &'a String) -> Self {
        AmountInput::Text(value.as_str())
    }
}

impl<'a, T: Into<AmountInput<'a>>> From<Option<T>> for AmountInput<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AmountInput::Absent)
    }
}

/// Characters a monetary field is allowed to hold while being edited.
pub fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}

/// Convert free-form amount text into canonical `digits('.'digits)?` form.
///
/// Everything but digits, `.` and `,` is discarded. If a comma survives it is
/// the decimal separator and every dot is grouping. With several commas the
/// last one wins and the others are dropped. Without a comma a single dot is
/// kept as the decimal point, while two or more dots can only be grouping and
/// are all removed.
///
/// Text without any digit yields an empty string rather than zero.
pub fn to_canonical(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| is_amount_char(*c)).collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return String::new();
    }

    let split = if cleaned.contains(',') {
        cleaned.rsplit_once(',')
    } else if cleaned.matches('.').count() == 1 {
        cleaned.split_once('.')
    } else {
        None
    };
    let (integer, fraction) = split.unwrap_or((cleaned.as_str(), ""));

    let mut integer = digits_of(integer);
    let fraction = digits_of(fraction);
    if integer.is_empty() {
        integer.push('0');
    }

    if fraction.is_empty() {
        integer
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// The text a focused field shows: canonical digits with a comma decimal
/// separator and no symbol or grouping, e.g. `"1234,56"`.
pub fn to_editable(raw: &str) -> String {
    to_canonical(raw).replacen('.', ",", 1)
}

/// Render a value as pt-BR currency text.
///
/// Absent values, empty text and text that does not start with a number all
/// become [`ZERO_DISPLAY`].
pub fn to_display<'a>(value: impl Into<AmountInput<'a>>) -> String {
    match value.into() {
        AmountInput::Number(number) => format_brl(number),
        AmountInput::Text(text) => parse_amount(text)
            .map(format_brl)
            .unwrap_or_else(|| ZERO_DISPLAY.to_string()),
        AmountInput::Absent => ZERO_DISPLAY.to_string(),
    }
}

/// Read a number out of display, editable or canonical text.
///
/// When a comma is present it is the decimal point (the last one, if several)
/// and dots are grouping. Parsing then takes the longest numeric prefix, the
/// way a browser's `parseFloat` does, so `"12abc"` reads as 12 while `"abc"`
/// and `"R$ 5"` read as nothing. Non-finite results are rejected.
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let normalized = match text.rsplit_once(',') {
        Some((integer, fraction)) => format!(
            "{}.{}",
            integer.replace(['.', ','], ""),
            fraction.replace('.', "")
        ),
        None => text.to_string(),
    };
    leading_number(&normalized)
}

/// Format a number as `R$ 1.234,56`, rounding half away from zero to cents.
///
/// Rounding works on the shortest decimal text of the value, so `1.005`
/// is treated as written and becomes `R$ 1,01`. Negative amounts carry a
/// leading minus (`-R$ 5,00`); anything that rounds to zero cents is shown
/// unsigned.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return ZERO_DISPLAY.to_string();
    }

    let cents = round_to_cents(value.abs());
    let (integer, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let sign = if value < 0.0 && cents != "0.00" { "-" } else { "" };
    format!(
        "{}{} {}{}{}",
        sign,
        CURRENCY_SYMBOL,
        group_thousands(integer),
        DECIMAL_SEPARATOR,
        fraction
    )
}

/// `magnitude` rounded to two places as `digits.dd`.
fn round_to_cents(magnitude: f64) -> String {
    // `Display` for f64 is the shortest text that reads back as the same value.
    match Decimal::from_str(&magnitude.to_string()) {
        Ok(decimal) => format!(
            "{:.2}",
            decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        // Too small for 28 decimal places: nothing survives at cent precision.
        Err(_) if magnitude < 1.0 => "0.00".to_string(),
        // Beyond Decimal's range the value is a whole number already.
        Err(_) => format!("{:.0}.00", magnitude),
    }
}

fn group_thousands(integer: &str) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

fn digits_of(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Longest `[sign] digits [. digits] [e [sign] digits]` prefix, parsed.
fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            end = 1;
            true
        }
        Some(b'+') => {
            end = 1;
            false
        }
        _ => false,
    };

    let integer_len = count_digits(end);
    let integer = &text[end..end + integer_len];
    end += integer_len;

    let mut fraction = "";
    if bytes.get(end) == Some(&b'.') {
        let fraction_len = count_digits(end + 1);
        fraction = &text[end + 1..end + 1 + fraction_len];
        end += 1 + fraction_len;
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut exponent = String::new();
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut cursor = end + 1;
        let exponent_sign = match bytes.get(cursor) {
            Some(b'-') => {
                cursor += 1;
                "-"
            }
            Some(b'+') => {
                cursor += 1;
                ""
            }
            _ => "",
        };
        let exponent_len = count_digits(cursor);
        if exponent_len > 0 {
            exponent = format!("e{}{}", exponent_sign, &text[cursor..cursor + exponent_len]);
        }
    }

    let literal = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if integer.is_empty() { "0" } else { integer },
        if fraction.is_empty() { "0" } else { fraction },
        exponent
    );
    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}
