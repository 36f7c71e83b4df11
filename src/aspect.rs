//! Aspect ratio classification
//!
//! Only exact ratios count: 1366x768 is not 16:9.

use std::fmt;

use crate::resolution::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectClass {
    FourThree,
    SixteenNine,
    /// Any other ratio, reduced to lowest terms
    Other { width: u32, height: u32 },
}

impl AspectClass {
    pub fn of(resolution: &Resolution) -> Self {
        classify(resolution.width, resolution.height)
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourThree => f.write_str("4:3"),
            Self::SixteenNine => f.write_str("16:9"),
            Self::Other { width, height } => write!(f, "{width}:{height}"),
        }
    }
}

/// Classify `width x height` by cross-multiplication
pub fn classify(width: u32, height: u32) -> AspectClass {
    let (w, h) = (u64::from(width), u64::from(height));
    if 4 * h == 3 * w {
        AspectClass::FourThree
    } else if 16 * h == 9 * w {
        AspectClass::SixteenNine
    } else {
        let divisor = gcd(width, height).max(1);
        AspectClass::Other {
            width: width / divisor,
            height: height / divisor,
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_classes() {
        assert_eq!(classify(640, 480), AspectClass::FourThree);
        assert_eq!(classify(800, 600), AspectClass::FourThree);
        assert_eq!(classify(3264, 2448), AspectClass::FourThree);
        assert_eq!(classify(1920, 1080), AspectClass::SixteenNine);
        assert_eq!(classify(1280, 720), AspectClass::SixteenNine);
    }

    #[test]
    fn test_other_is_reduced() {
        assert!(matches!(classify(1234, 999), AspectClass::Other { .. }));
        assert_eq!(classify(1280, 1024), AspectClass::Other { width: 5, height: 4 });
        assert_eq!(classify(1280, 1024).to_string(), "5:4");
        // Close to 16:9 but not exact
        assert_eq!(classify(1366, 768), AspectClass::Other { width: 683, height: 384 });
    }

    #[test]
    fn test_portrait_is_not_landscape_class() {
        assert!(matches!(classify(480, 640), AspectClass::Other { width: 3, height: 4 }));
    }

    #[test]
    fn test_labels() {
        assert_eq!(AspectClass::FourThree.to_string(), "4:3");
        assert_eq!(AspectClass::SixteenNine.to_string(), "16:9");
    }

    #[test]
    fn test_of_resolution_is_deterministic() {
        let res = Resolution::new(1440, 1080);
        assert_eq!(AspectClass::of(&res), AspectClass::of(&res));
        assert_eq!(AspectClass::of(&res), AspectClass::FourThree);
    }
}
