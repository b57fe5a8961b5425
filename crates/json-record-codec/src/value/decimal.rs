use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Exact base-10 number: `mantissa * 10^-scale`.
///
/// The scale is kept as written, so `1.50` and `1.5` are distinct values
/// that print differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("invalid decimal literal")]
    Invalid,
    #[error("decimal literal out of range")]
    Overflow,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    /// Largest number of fractional digits kept.
    pub const MAX_SCALE: u32 = 28;

    pub fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(value.into(), 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(value.into(), 0)
    }
}

fn push_digit(acc: i128, digit: u8) -> Result<i128, ParseDecimalError> {
    acc.checked_mul(10)
        .and_then(|acc| acc.checked_add(i128::from(digit - b'0')))
        .ok_or(ParseDecimalError::Overflow)
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses JSON number syntax, exponent included. Fractional digits past
    /// [`Decimal::MAX_SCALE`] are dropped when they are zeros and rounded
    /// half away from zero otherwise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let mut pos = 0;
        let negative = bytes.first() == Some(&b'-');
        if negative {
            pos += 1;
        }

        let mut mantissa: i128 = 0;
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            mantissa = push_digit(mantissa, bytes[pos])?;
            pos += 1;
        }
        if pos == start {
            return Err(ParseDecimalError::Invalid);
        }

        let mut frac_digits: i64 = 0;
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                mantissa = push_digit(mantissa, bytes[pos])?;
                frac_digits += 1;
                pos += 1;
            }
            if frac_digits == 0 {
                return Err(ParseDecimalError::Invalid);
            }
        }

        let mut exponent: i64 = 0;
        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            pos += 1;
            let exp_negative = match bytes.get(pos) {
                Some(b'-') => {
                    pos += 1;
                    true
                }
                Some(b'+') => {
                    pos += 1;
                    false
                }
                _ => false,
            };
            let exp_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                exponent = exponent
                    .saturating_mul(10)
                    .saturating_add(i64::from(bytes[pos] - b'0'));
                pos += 1;
            }
            if pos == exp_start {
                return Err(ParseDecimalError::Invalid);
            }
            if exp_negative {
                exponent = -exponent;
            }
        }
        if pos != bytes.len() {
            return Err(ParseDecimalError::Invalid);
        }

        let max_scale = i64::from(Self::MAX_SCALE);
        let mut scale = frac_digits.saturating_sub(exponent);
        if mantissa == 0 {
            scale = scale.clamp(0, max_scale);
        }
        while scale < 0 {
            mantissa = mantissa
                .checked_mul(10)
                .ok_or(ParseDecimalError::Overflow)?;
            scale += 1;
        }
        while scale > max_scale && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        if scale > max_scale {
            let drop = scale - max_scale;
            mantissa = if drop > 38 {
                0
            } else {
                let divisor = 10i128.pow(drop as u32);
                let (quotient, remainder) = (mantissa / divisor, mantissa % divisor);
                if remainder >= divisor - remainder {
                    quotient + 1
                } else {
                    quotient
                }
            };
            scale = max_scale;
        }

        Ok(Self {
            mantissa: if negative { -mantissa } else { mantissa },
            scale: scale as u32,
        })
    }
}

impl fmt::Display for Decimal {
    /// Exact digits, never an exponent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{}.{}", int, frac)
        } else {
            write!(f, "0.{:0>width$}", digits, width = scale)
        }
    }
}
