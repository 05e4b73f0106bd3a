//! Tick classification and label formatting.
//!
//! A tick's visual weight is a pure function of its index and the configured
//! significant-tick interval; nothing here depends on the tick's value except
//! the label text.

/// Visual weight class of a tick on the tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickClass {
    /// Full-height tick with a value label.
    Major,
    /// Halfway between two major ticks.
    Mid,
    /// Everything else.
    Minor,
}

/// Classify a tick index against the significant-tick interval.
///
/// `interval == 0` skips classification entirely and yields [`TickClass::Minor`]
/// for every index. The mid check only runs for `interval >= 2` so the
/// `interval / 2` modulus can never be zero.
pub fn classify(index: usize, interval: u32) -> TickClass {
    if interval == 0 {
        return TickClass::Minor;
    }
    if index % interval as usize == 0 {
        TickClass::Major
    } else if interval >= 2 && index % (interval / 2) as usize == 0 {
        TickClass::Mid
    } else {
        TickClass::Minor
    }
}

/// Format a tick value for display: integral values render without a decimal
/// point, everything else uses the natural decimal representation.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_interval_ten() {
        // Scenario: series 0..=100, interval 10
        assert_eq!(classify(10, 10), TickClass::Major);
        assert_eq!(classify(5, 10), TickClass::Mid);
        assert_eq!(classify(3, 10), TickClass::Minor);
    }

    #[test]
    fn test_classify_zero_index_is_major() {
        for interval in 1..20 {
            assert_eq!(classify(0, interval), TickClass::Major);
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify(35, 10), TickClass::Mid);
            assert_eq!(classify(37, 10), TickClass::Minor);
            assert_eq!(classify(40, 10), TickClass::Major);
        }
    }

    #[test]
    fn test_classify_zero_interval_is_all_minor() {
        for index in 0..50 {
            assert_eq!(classify(index, 0), TickClass::Minor);
        }
    }

    #[test]
    fn test_classify_interval_one_guards_mid_division() {
        // Only the mid modulus is guarded; interval 1 makes every index major.
        assert_eq!(classify(0, 1), TickClass::Major);
        assert_eq!(classify(7, 1), TickClass::Major);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-3.0), "-3");
    }
}
