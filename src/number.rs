//! Numeric literals.
//!
//! A [`Number`] keeps the literal exactly as written (`0xFF_FF`, `-1_000.5e3`, `#nan`) and
//! converts on demand. Converting to a fixed-width integer reports overflow as
//! [`NumberError::Overflow`] instead of truncating.
//!
//! ```rust
//! use kdl_reader::{Number, Radix};
//!
//! let n: Number = "0xff".parse().unwrap();
//! assert_eq!(n.radix(), Radix::Hexadecimal);
//! assert_eq!(n.to_u8().unwrap(), 255);
//! assert!(n.to_i8().is_err());
//! assert_eq!(n.canonical(), "255");
//! ```

use num_bigint::BigInt;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const INF: &str = "#inf";
const NEG_INF: &str = "#-inf";
const NAN: &str = "#nan";

// 10^MAX_EXPONENT bounds the work done when expanding exponents into a Decimal.
const MAX_EXPONENT: i64 = 4096;

/// Failure converting a numeric literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("`{0}` is not a valid number")]
    Malformed(String),

    #[error("`{0}` is not an integer")]
    NotAnInteger(String),

    #[error("`{literal}` does not fit in {target}")]
    Overflow { literal: String, target: &'static str },

    #[error("`{0}` is not a finite number")]
    NotFinite(String),
}

/// Radix of a numeric literal, inferred from its prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary = 2,
    Octal = 8,
    Decimal = 10,
    Hexadecimal = 16,
}

impl Radix {
    fn prefix(self) -> &'static str {
        match self {
            Radix::Binary => "0b",
            Radix::Octal => "0o",
            Radix::Decimal => "",
            Radix::Hexadecimal => "0x",
        }
    }

    fn accepts(self, ch: char) -> bool {
        match self {
            Radix::Binary => matches!(ch, '0'..='1'),
            Radix::Octal => matches!(ch, '0'..='7'),
            Radix::Decimal => ch.is_ascii_digit(),
            Radix::Hexadecimal => ch.is_ascii_hexdigit(),
        }
    }
}

/// An arbitrary-precision decimal: `mantissa * 10^-scale`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    pub mantissa: BigInt,
    pub scale: u32,
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.magnitude().to_string();
        let sign = if self.mantissa.sign() == num_bigint::Sign::Minus {
            "-"
        } else {
            ""
        };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int, frac) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int, frac)
    }
}

/// The pieces of a validated literal.
struct Parts<'a> {
    negative: bool,
    radix: Radix,
    integer: &'a str,
    fraction: Option<&'a str>,
    exponent: Option<&'a str>,
}

/// A numeric value that keeps its original literal text.
#[derive(Clone, Debug)]
pub struct Number {
    raw: String,
}

impl Number {
    /// Validates `text` as a numeric literal.
    ///
    /// Accepts `[+-]?` followed by `0x`/`0o`/`0b` digits, or decimal digits with an optional
    /// fraction and exponent. `_` may separate digits after the first one. The special tokens
    /// `#inf`, `#-inf` and `#nan` are accepted too.
    pub fn parse(text: &str) -> Result<Self, NumberError> {
        if matches!(text, INF | NEG_INF | NAN) {
            return Ok(Number {
                raw: text.to_string(),
            });
        }
        split(text)?;
        Ok(Number {
            raw: text.to_string(),
        })
    }

    /// Positive infinity (`#inf`).
    #[must_use]
    pub fn infinity() -> Self {
        Number {
            raw: INF.to_string(),
        }
    }

    /// Negative infinity (`#-inf`).
    #[must_use]
    pub fn neg_infinity() -> Self {
        Number {
            raw: NEG_INF.to_string(),
        }
    }

    /// Not-a-number (`#nan`).
    #[must_use]
    pub fn nan() -> Self {
        Number {
            raw: NAN.to_string(),
        }
    }

    /// The literal exactly as written.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Radix inferred from the literal's prefix.
    #[must_use]
    pub fn radix(&self) -> Radix {
        self.parts().map_or(Radix::Decimal, |p| p.radix)
    }

    /// Returns `true` for `#inf`, `#-inf` and `#nan`.
    #[inline]
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self.raw.as_str(), INF | NEG_INF | NAN)
    }

    /// Returns `true` when the literal has no fraction or exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.parts()
            .is_some_and(|p| p.fraction.is_none() && p.exponent.is_none())
    }

    fn parts(&self) -> Option<Parts<'_>> {
        if self.is_special() {
            None
        } else {
            split(&self.raw).ok()
        }
    }

    /// Converts to an arbitrary-precision integer.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotAnInteger`] for fractions, exponents and special values.
    pub fn to_bigint(&self) -> Result<BigInt, NumberError> {
        let parts = self
            .parts()
            .filter(|p| p.fraction.is_none() && p.exponent.is_none())
            .ok_or_else(|| NumberError::NotAnInteger(self.raw.clone()))?;
        let digits = strip_separators(parts.integer);
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), parts.radix as u32)
            .ok_or_else(|| NumberError::Malformed(self.raw.clone()))?;
        Ok(if parts.negative { -magnitude } else { magnitude })
    }

    /// Converts to `f64`. Out-of-range values become infinite rather than failing.
    pub fn to_f64(&self) -> Result<f64, NumberError> {
        match self.raw.as_str() {
            INF => return Ok(f64::INFINITY),
            NEG_INF => return Ok(f64::NEG_INFINITY),
            NAN => return Ok(f64::NAN),
            _ => {}
        }
        let text = if self.radix() == Radix::Decimal {
            strip_separators(&self.raw)
        } else {
            self.to_bigint()?.to_string()
        };
        text.parse::<f64>()
            .map_err(|_| NumberError::Malformed(self.raw.clone()))
    }

    /// Converts to `f32`. Out-of-range values become infinite rather than failing.
    pub fn to_f32(&self) -> Result<f32, NumberError> {
        match self.raw.as_str() {
            INF => return Ok(f32::INFINITY),
            NEG_INF => return Ok(f32::NEG_INFINITY),
            NAN => return Ok(f32::NAN),
            _ => {}
        }
        let text = if self.radix() == Radix::Decimal {
            strip_separators(&self.raw)
        } else {
            self.to_bigint()?.to_string()
        };
        text.parse::<f32>()
            .map_err(|_| NumberError::Malformed(self.raw.clone()))
    }

    /// Converts to an exact decimal.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotFinite`] for special values, [`NumberError::Overflow`] when the
    /// exponent is unreasonably large.
    pub fn to_decimal(&self) -> Result<Decimal, NumberError> {
        if self.is_special() {
            return Err(NumberError::NotFinite(self.raw.clone()));
        }
        if self.radix() != Radix::Decimal {
            return Ok(Decimal {
                mantissa: self.to_bigint()?,
                scale: 0,
            });
        }
        let parts = split(&self.raw)?;
        let fraction = parts.fraction.map(strip_separators).unwrap_or_default();
        let mut digits = strip_separators(parts.integer);
        digits.push_str(&fraction);
        let overflow = || NumberError::Overflow {
            literal: self.raw.clone(),
            target: "decimal",
        };
        let exponent: i64 = match parts.exponent {
            Some(exp) => strip_separators(exp).parse().map_err(|_| overflow())?,
            None => 0,
        };
        if exponent.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
            return Err(overflow());
        }
        let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| NumberError::Malformed(self.raw.clone()))?;
        if parts.negative {
            mantissa = -mantissa;
        }
        let scale = i64::try_from(fraction.len())
            .ok()
            .and_then(|len| len.checked_sub(exponent))
            .ok_or_else(overflow)?;
        if scale < 0 {
            mantissa *= BigInt::from(10u8).pow(scale.unsigned_abs() as u32);
            Ok(Decimal { mantissa, scale: 0 })
        } else {
            Ok(Decimal {
                mantissa,
                scale: u32::try_from(scale).map_err(|_| overflow())?,
            })
        }
    }

    /// The canonical spelling used for comparison and canonical writing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_reader::Number;
    ///
    /// assert_eq!(Number::parse("0b1010").unwrap().canonical(), "10");
    /// assert_eq!(Number::parse("+1_000.5E3").unwrap().canonical(), "1000.5e3");
    /// assert_eq!(Number::nan().canonical(), "#nan");
    /// ```
    #[must_use]
    pub fn canonical(&self) -> String {
        if self.is_special() {
            return self.raw.clone();
        }
        if self.is_integer() {
            if let Ok(value) = self.to_bigint() {
                return value.to_string();
            }
        }
        let text = strip_separators(&self.raw).replace('E', "e");
        text.strip_prefix('+').map(str::to_string).unwrap_or(text)
    }
}

macro_rules! integer_conversions {
    ($($name:ident => $ty:ty),* $(,)?) => {
        impl Number {
            $(
                #[doc = concat!("Converts to `", stringify!($ty), "`, failing on overflow or non-integers.")]
                pub fn $name(&self) -> Result<$ty, NumberError> {
                    let value = self.to_bigint()?;
                    <$ty>::try_from(&value).map_err(|_| NumberError::Overflow {
                        literal: self.raw.clone(),
                        target: stringify!($ty),
                    })
                }
            )*
        }
    };
}

integer_conversions! {
    to_i8 => i8,
    to_i16 => i16,
    to_i32 => i32,
    to_i64 => i64,
    to_i128 => i128,
    to_u8 => u8,
    to_u16 => u16,
    to_u32 => u32,
    to_u64 => u64,
    to_u128 => u128,
}

fn strip_separators(text: &str) -> String {
    text.chars().filter(|&ch| ch != '_').collect()
}

/// Checks the literal grammar and splits it into its parts.
fn split(text: &str) -> Result<Parts<'_>, NumberError> {
    let malformed = || NumberError::Malformed(text.to_string());
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let radix = [Radix::Hexadecimal, Radix::Octal, Radix::Binary]
        .into_iter()
        .find(|r| body.starts_with(r.prefix()))
        .unwrap_or(Radix::Decimal);
    let body = &body[radix.prefix().len()..];

    if radix != Radix::Decimal {
        if !digit_run(body, radix) {
            return Err(malformed());
        }
        return Ok(Parts {
            negative,
            radix,
            integer: body,
            fraction: None,
            exponent: None,
        });
    }

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => {
            let exp = &body[at + 1..];
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if !digit_run(digits, Radix::Decimal) {
                return Err(malformed());
            }
            (&body[..at], Some(exp))
        }
        None => (body, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((int, frac)) => {
            if !digit_run(frac, Radix::Decimal) {
                return Err(malformed());
            }
            (int, Some(frac))
        }
        None => (mantissa, None),
    };
    if !digit_run(integer, Radix::Decimal) {
        return Err(malformed());
    }
    Ok(Parts {
        negative,
        radix,
        integer,
        fraction,
        exponent,
    })
}

/// A digit of `radix` followed by digits and `_` separators.
fn digit_run(text: &str, radix: Radix) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if radix.accepts(first) => chars.all(|ch| ch == '_' || radix.accepts(ch)),
        _ => false,
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::parse(s)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw || self.canonical() == other.canonical()
    }
}

impl Eq for Number {}

impl std::hash::Hash for Number {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number { raw: value.to_string() }
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Number::nan()
        } else if value.is_infinite() {
            if value > 0.0 {
                Number::infinity()
            } else {
                Number::neg_infinity()
            }
        } else {
            // Debug keeps a fraction or exponent, so the literal stays a float.
            Number {
                raw: format!("{:?}", value),
            }
        }
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::from(f64::from(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number {
            raw: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> Number {
        Number::parse(text).unwrap()
    }

    #[test]
    fn test_accepts_literal_grammar() {
        for text in [
            "0", "-0", "+7", "1_000", "1__0_", "3.14", "1e10", "1E-3", "-2.5e+7", "0x1F", "0xdead_beef",
            "-0o777", "0b1010_1010", "#inf", "#-inf", "#nan",
        ] {
            assert!(Number::parse(text).is_ok(), "{text} should parse");
        }
    }

    #[test]
    fn test_rejects_malformed_literals() {
        for text in [
            "", "-", "_1", "1.", ".5", "1.e5", "1e", "1e_", "0x", "0x_1", "0b2", "0o8", "1.2.3", "12abc",
            "#infinity",
        ] {
            assert!(Number::parse(text).is_err(), "{text} should fail");
        }
    }

    #[test]
    fn test_radix_inference() {
        assert_eq!(num("0x10").radix(), Radix::Hexadecimal);
        assert_eq!(num("-0o10").radix(), Radix::Octal);
        assert_eq!(num("0b10").radix(), Radix::Binary);
        assert_eq!(num("10").radix(), Radix::Decimal);
        assert_eq!(num("#nan").radix(), Radix::Decimal);
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(num("255").to_u8().unwrap(), 255);
        assert!(matches!(
            num("256").to_u8(),
            Err(NumberError::Overflow { target: "u8", .. })
        ));
        assert_eq!(num("-128").to_i8().unwrap(), -128);
        assert!(num("-129").to_i8().is_err());
        assert_eq!(num("4294967295").to_u32().unwrap(), u32::MAX);
        assert_eq!(num("-0x80").to_i8().unwrap(), i8::MIN);
        assert_eq!(num("0xFFFF_FFFF_FFFF_FFFF").to_u64().unwrap(), u64::MAX);
        assert!(num("-1").to_u64().is_err());
    }

    #[test]
    fn test_non_integers_are_rejected_by_integer_conversions() {
        assert!(matches!(num("1.5").to_i32(), Err(NumberError::NotAnInteger(_))));
        assert!(matches!(num("1e3").to_i32(), Err(NumberError::NotAnInteger(_))));
        assert!(matches!(num("#inf").to_i32(), Err(NumberError::NotAnInteger(_))));
    }

    #[test]
    fn test_float_conversions_never_overflow() {
        assert_eq!(num("1_000.25").to_f64().unwrap(), 1000.25);
        assert_eq!(num("0xff").to_f64().unwrap(), 255.0);
        assert_eq!(num("1e400").to_f64().unwrap(), f64::INFINITY);
        assert_eq!(num("1e39").to_f32().unwrap(), f32::INFINITY);
        assert!(num("#nan").to_f64().unwrap().is_nan());
        assert_eq!(num("#-inf").to_f32().unwrap(), f32::NEG_INFINITY);
    }

    #[test]
    fn test_bigint_beyond_u128() {
        let big = num("340282366920938463463374607431768211456");
        assert!(big.to_u128().is_err());
        assert_eq!(
            big.to_bigint().unwrap().to_string(),
            "340282366920938463463374607431768211456"
        );
    }

    #[test]
    fn test_decimal_conversion() {
        let d = num("-12.50").to_decimal().unwrap();
        assert_eq!(d.mantissa, BigInt::from(-1250));
        assert_eq!(d.scale, 2);
        assert_eq!(d.to_string(), "-12.50");

        let d = num("1.5e2").to_decimal().unwrap();
        assert_eq!(d.to_string(), "150");

        let d = num("5e-3").to_decimal().unwrap();
        assert_eq!(d.to_string(), "0.005");

        assert!(matches!(num("#inf").to_decimal(), Err(NumberError::NotFinite(_))));
        assert!(num("1e99999").to_decimal().is_err());
    }

    #[test]
    fn test_decimal_extreme_exponents() {
        for text in [
            "1e-9223372036854775808",
            "1e9223372036854775807",
            "1.5e-99999999999999999999",
            "1e-4097",
        ] {
            assert!(
                matches!(num(text).to_decimal(), Err(NumberError::Overflow { .. })),
                "{text} should overflow"
            );
        }
        assert_eq!(num("1e-4096").to_decimal().unwrap().scale, 4096);
    }

    #[test]
    fn test_canonical_equality() {
        assert_eq!(num("0xff"), num("255"));
        assert_eq!(num("1_000"), num("+1000"));
        assert_eq!(num("#nan"), num("#nan"));
        assert_ne!(num("1.0"), num("1"));
        assert_eq!(num("007").canonical(), "7");
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Number::from(42u8).raw(), "42");
        assert_eq!(Number::from(-3i64).raw(), "-3");
        assert_eq!(Number::from(1.5f64).raw(), "1.5");
        assert_eq!(Number::from(1.0f64).raw(), "1.0");
        assert_eq!(Number::from(f64::INFINITY).raw(), "#inf");
        assert!(Number::parse(Number::from(1e-7f64).raw()).is_ok());
    }
}
