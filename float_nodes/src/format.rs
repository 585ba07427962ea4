//! Float to text conversion.
//!
//! `to_s`/`inspect` must produce the shortest decimal string that parses back
//! to the identical double. The digit generation is delegated to `ryu`; this
//! module only lays the digits out in the runtime's notation:
//! - `Infinity`, `-Infinity`, `NaN`
//! - fixed notation with a mandatory fractional part (`100.0`, `0.001`)
//!   for decimal exponents in `-3..=16`
//! - otherwise `d.ddde±XX` with at least two exponent digits (`1.0e+16`,
//!   `2.5e-05`)

/// Formatting collaborator used by `to_s`/`inspect`.
pub trait FloatFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Shortest round-trippable formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestFormatter;

impl FloatFormatter for ShortestFormatter {
    fn format(&self, value: f64) -> String {
        format_float(value)
    }
}

/// Largest decimal exponent still printed in fixed notation (DBL_DIG + 1).
const FIXED_MAX_EXPONENT: i32 = 16;
/// Smallest decimal exponent still printed in fixed notation.
const FIXED_MIN_EXPONENT: i32 = -3;

/// Format a double the way `Float#to_s` does.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }

    let mut buffer = ryu::Buffer::new();
    let (digits, exponent) = decompose(buffer.format_finite(value));
    let sign = if value.is_sign_negative() { "-" } else { "" };

    if digits.is_empty() {
        return format!("{}0.0", sign);
    }

    let mut out = String::with_capacity(digits.len() + 8);
    out.push_str(sign);

    if exponent > 0 && exponent <= FIXED_MAX_EXPONENT {
        let point = exponent as usize;
        if digits.len() <= point {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take(point - digits.len()));
            out.push_str(".0");
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    } else if exponent <= 0 && exponent >= FIXED_MIN_EXPONENT {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-exponent) as usize));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        out.push('.');
        if digits.len() > 1 {
            out.push_str(&digits[1..]);
        } else {
            out.push('0');
        }
        let e = exponent - 1;
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", e.abs()));
    }
    out
}

/// Split ryu output into significant digits and a decimal exponent such that
/// `value == 0.DIGITS * 10^exponent`. Zero yields empty digits.
fn decompose(repr: &str) -> (String, i32) {
    let unsigned = repr.strip_prefix('-').unwrap_or(repr);
    let (mantissa, exp) = match unsigned.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut point = int_part.len() as i32 + exp;
    let raw: String = int_part.chars().chain(frac_part.chars()).collect();
    let trimmed_front = raw.trim_start_matches('0');
    if trimmed_front.is_empty() {
        return (String::new(), 0);
    }
    point -= (raw.len() - trimmed_front.len()) as i32;
    let digits = trimmed_front.trim_end_matches('0').to_string();
    (digits, point)
}
