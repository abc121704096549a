//! Command-line tokenizer and numeric token parsing.
//!
//! Numeric parsing is deliberately lenient: like the C library `atoi`/`atof`
//! it reads the longest numeric prefix and ignores the rest, so `"12ms"` is
//! `12` and `"abc"` is `0`.

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{Error, Result};

/// Maximum number of tokens kept from one line.
pub const MAX_ARGS: usize = 5;

/// Maximum token length in characters.
pub const MAX_ARG_LEN: usize = 19;

/// Multiplier applied when a frequency token contains `K`/`k`.
pub const KILO: i64 = 1000;

/// Token limits for [`parse_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgLimits {
    /// Tokens past this count are ignored.
    pub max_args: usize,
    /// Tokens longer than this are dropped.
    pub max_len: usize,
}

impl Default for ArgLimits {
    fn default() -> Self {
        Self {
            max_args: MAX_ARGS,
            max_len: MAX_ARG_LEN,
        }
    }
}

/// Result of tokenizing one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    /// Accepted tokens, in order.
    pub args: Vec<String>,
    /// One [`Error::ArgumentTooLong`] per dropped token.
    pub dropped: Vec<Error>,
}

/// Split `line` on whitespace runs.
///
/// Over-long tokens are dropped and recorded in [`ParsedLine::dropped`];
/// tokenizing continues with the next token. Once `max_args` tokens are
/// accepted the rest of the line is ignored.
pub fn parse_line(line: &str, limits: &ArgLimits) -> ParsedLine {
    let mut parsed = ParsedLine::default();
    for token in line.split_whitespace() {
        if parsed.args.len() >= limits.max_args {
            break;
        }
        if token.chars().count() > limits.max_len {
            #[cfg(feature = "tracing")]
            tracing::warn!("dropping over-long argument '{token}'");
            parsed.dropped.push(Error::ArgumentTooLong {
                token: token.to_string(),
                max: limits.max_len,
            });
            continue;
        }
        parsed.args.push(token.to_string());
    }
    parsed
}

/// Case-insensitive prefix match: does `token` abbreviate `name`?
///
/// Only as many characters as the user typed are compared, so a token longer
/// than `name` never matches and an empty token matches everything.
pub fn matches_prefix(name: &str, token: &str) -> bool {
    name.len() >= token.len()
        && name.as_bytes()[..token.len()].eq_ignore_ascii_case(token.as_bytes())
}

/// Leading integer of `token`, `atoi` style. No digits gives `0`.
pub fn parse_int_prefix(token: &str) -> i64 {
    let bytes = token.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let magnitude = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0_i64, |acc, &b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    if negative { -magnitude } else { magnitude }
}

/// Leading decimal number of `token`, `atof` style. No number gives `0.0`.
pub fn parse_float_prefix(token: &str) -> f64 {
    let s = token.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Parse a frequency or rate token in Hz.
///
/// A `K`/`k` anywhere in the token multiplies by 1000. Leading `K`s are
/// skipped, then the integer prefix is read and parsing stops at the first
/// non-digit. `"5k"`, `"5K"`, `"k5"` and `"5k3"` are all `5000`.
///
/// # Errors
///
/// [`Error::InvalidFrequency`] when the value is not positive or does not fit
/// in a `u32`.
pub fn parse_frequency(token: &str) -> Result<u32> {
    let multiplier = if token.bytes().any(|b| b.eq_ignore_ascii_case(&b'k')) {
        KILO
    } else {
        1
    };
    let numeric = token.trim_start_matches(['k', 'K']);
    let hz = parse_int_prefix(numeric).saturating_mul(multiplier);
    match u32::try_from(hz) {
        Ok(hz) if hz > 0 => Ok(hz),
        _ => Err(Error::InvalidFrequency(token.to_string())),
    }
}
