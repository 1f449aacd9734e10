use std::fmt;

///
/// MatchScore
///
/// Fixed-point score in thousandths, so equal inputs always produce equal
/// scores bit for bit.
///
/// `value` is the match quality and decides acceptance. `coverage` only
/// orders candidates of equal quality (the share of writable DTO properties
/// a method consumes); name and property scores leave it at zero.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MatchScore {
    value: u16,
    coverage: u16,
}

impl MatchScore {
    /// Denominator of the fixed-point representation.
    pub const SCALE: u16 = 1000;

    /// The lowest possible score.
    pub const NONE: Self = Self::new(0);

    /// Minimum score at which a match is usable without ambiguity.
    pub const PERFECT: Self = Self::new(Self::SCALE);

    /// Build a score from a value in thousandths, clamped to `SCALE`.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        let value = if value > Self::SCALE { Self::SCALE } else { value };

        Self { value, coverage: 0 }
    }

    /// Build a score from `numerator / denominator`, scaled into thousandths
    /// and rounded down. A zero denominator yields `NONE`.
    #[must_use]
    pub fn from_ratio(numerator: usize, denominator: usize) -> Self {
        Self::new(thousandths(numerator, denominator))
    }

    #[must_use]
    pub const fn with_coverage(self, coverage: u16) -> Self {
        let coverage = if coverage > Self::SCALE {
            Self::SCALE
        } else {
            coverage
        };

        Self {
            value: self.value,
            coverage,
        }
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.value
    }

    #[must_use]
    pub const fn coverage(self) -> u16 {
        self.coverage
    }

    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.value >= Self::SCALE
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_thousandths(f, self.value)
    }
}

/// `numerator / denominator` in thousandths, capped at `SCALE`.
pub(crate) fn thousandths(numerator: usize, denominator: usize) -> u16 {
    if denominator == 0 {
        return 0;
    }

    let scaled = numerator.saturating_mul(usize::from(MatchScore::SCALE)) / denominator;

    u16::try_from(scaled).map_or(MatchScore::SCALE, |v| v.min(MatchScore::SCALE))
}

pub(crate) fn write_thousandths(f: &mut fmt::Formatter<'_>, value: u16) -> fmt::Result {
    write!(
        f,
        "{}.{:03}",
        value / MatchScore::SCALE,
        value % MatchScore::SCALE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_is_the_acceptance_floor() {
        assert!(MatchScore::PERFECT.is_perfect());
        assert!(MatchScore::PERFECT.with_coverage(0).is_perfect());
        assert!(!MatchScore::new(999).with_coverage(1000).is_perfect());
        assert!(MatchScore::new(5000).is_perfect());
    }

    #[test]
    fn coverage_orders_equal_values_only() {
        let full = MatchScore::PERFECT.with_coverage(1000);
        let partial = MatchScore::PERFECT.with_coverage(500);
        let imperfect = MatchScore::new(999).with_coverage(1000);

        assert!(full > partial);
        assert!(partial > imperfect);
        assert!(MatchScore::NONE < imperfect);
    }

    #[test]
    fn ratios_round_down() {
        assert_eq!(MatchScore::from_ratio(1, 3).value(), 333);
        assert_eq!(MatchScore::from_ratio(2, 2), MatchScore::PERFECT);
        assert_eq!(MatchScore::from_ratio(1, 0), MatchScore::NONE);
    }

    #[test]
    fn renders_as_decimal() {
        assert_eq!(MatchScore::PERFECT.to_string(), "1.000");
        assert_eq!(MatchScore::new(75).to_string(), "0.075");
    }
}
