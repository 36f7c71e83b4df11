//! Resolution token parsing
//!
//! Tokens look like `WIDTHxHEIGHT`, `WIDTHxHEIGHT@N/D` or
//! `WIDTHxHEIGHT@N1/D1-N2/D2`. A range is the span of rates the camera can
//! deliver for that mode; matching always uses its high end.

use std::fmt;
use std::str::FromStr;

use crate::constants::token::{
    DIMENSION_SEPARATOR, FRACTION_SEPARATOR, RANGE_SEPARATOR, RATE_SEPARATOR,
};
use crate::error::ParseError;

/// Frame rate as a fraction, e.g. `30000/1001`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameRate {
    /// Whole frames per second (truncating)
    pub fn fps(&self) -> u32 {
        self.numerator / self.denominator
    }
}

/// A parsed resolution token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub frame_rate_low: Option<FrameRate>,
    pub frame_rate_high: Option<FrameRate>,
}

impl Resolution {
    /// A resolution without frame rate information
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame_rate_low: None,
            frame_rate_high: None,
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Maximum deliverable frame rate in whole fps
    pub fn frame_rate(&self) -> Option<u32> {
        self.frame_rate_high.map(|rate| rate.fps())
    }

    /// Same mode without the frame rate part
    pub fn base(&self) -> Self {
        Self::new(self.width, self.height)
    }
}

/// `WIDTHxHEIGHT`, frame rate omitted
impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.width, DIMENSION_SEPARATOR, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        parse_resolution(token)
    }
}

/// Parse a resolution token
pub fn parse_resolution(token: &str) -> Result<Resolution, ParseError> {
    let token = token.trim();
    let (base, rate) = match token.split_once(RATE_SEPARATOR) {
        Some((base, rate)) => (base, Some(rate)),
        None => (token, None),
    };

    let (width, height) = base
        .split_once(DIMENSION_SEPARATOR)
        .ok_or_else(|| ParseError::MissingDimensions(token.to_string()))?;
    let width = parse_field(token, width)?;
    let height = parse_field(token, height)?;
    if width == 0 || height == 0 {
        return Err(ParseError::ZeroDimension(token.to_string()));
    }

    let Some(rate) = rate else {
        return Ok(Resolution::new(width, height));
    };

    let ends: Vec<&str> = rate.split(RANGE_SEPARATOR).collect();
    let (low, high) = match ends.as_slice() {
        [single] => {
            let rate = parse_fraction(token, single)?;
            (rate, rate)
        }
        [low, high] => (parse_fraction(token, low)?, parse_fraction(token, high)?),
        _ => return Err(ParseError::FieldCount(token.to_string())),
    };

    Ok(Resolution {
        width,
        height,
        frame_rate_low: Some(low),
        frame_rate_high: Some(high),
    })
}

fn parse_fraction(token: &str, s: &str) -> Result<FrameRate, ParseError> {
    let (numerator, denominator) = s
        .split_once(FRACTION_SEPARATOR)
        .ok_or_else(|| ParseError::FieldCount(token.to_string()))?;
    let numerator = parse_field(token, numerator)?;
    let denominator = parse_field(token, denominator)?;
    if denominator == 0 {
        return Err(ParseError::ZeroDenominator(token.to_string()));
    }
    Ok(FrameRate {
        numerator,
        denominator,
    })
}

fn parse_field(token: &str, field: &str) -> Result<u32, ParseError> {
    // Leftover separators mean the token had more fields than the grammar allows
    if field.contains([FRACTION_SEPARATOR, RANGE_SEPARATOR]) {
        return Err(ParseError::FieldCount(token.to_string()));
    }
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber {
            token: token.to_string(),
            field: field.to_string(),
        });
    }
    field.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
        field: field.to_string(),
    })
}
