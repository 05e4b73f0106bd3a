//! Bidirectional mapping between continuous scroll offsets and tick indices.

/// Pure offset ↔ index conversion, parameterized by the tick spacing and the
/// leading inset (half the viewport width, so tick 0 sits under the center
/// indicator at offset `offset_for_index(0)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetMapper {
    pub tick_spacing: f32,
    pub leading_inset: f32,
}

/// Small positive bias added to every tick-aligned offset so floating-point
/// lookups resolve to a deterministic tick instead of the boundary between two.
/// Capped at a quarter tick in [`OffsetMapper::offset_for_index`], otherwise a
/// sub-pixel spacing would push the biased offset past the half-up rounding
/// boundary and the round trip would land one tick high.
const OFFSET_BIAS: f32 = 0.5;

impl OffsetMapper {
    pub fn new(tick_spacing: f32, leading_inset: f32) -> Self {
        Self {
            tick_spacing,
            leading_inset,
        }
    }

    /// The exact scroll offset at which tick `index` is centered.
    pub fn offset_for_index(&self, index: usize) -> f32 {
        let bias = OFFSET_BIAS.min(self.tick_spacing * 0.25).max(0.0);
        index as f32 * self.tick_spacing - self.leading_inset + bias
    }

    /// The tick index nearest to a scroll offset, clamped into
    /// `[0, count - 1]`.
    ///
    /// Rounding is half-up: a fractional position strictly above 0.5 rounds to
    /// the next tick, anything else truncates toward zero. Non-positive
    /// spacing never divides; it resolves to index 0.
    pub fn index_for_offset(&self, offset: f32, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        if self.tick_spacing <= 0.0 {
            return 0;
        }
        let position = (offset + self.leading_inset) / self.tick_spacing;
        let index = if position - position.floor() > 0.5 {
            position.ceil() as i64
        } else {
            position as i64
        };
        index.clamp(0, count as i64 - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_exact_at_tick_alignment() {
        let mapper = OffsetMapper::new(20.0, 50.0);
        for i in 0..101 {
            assert_eq!(mapper.index_for_offset(mapper.offset_for_index(i), 101), i);
        }
    }

    #[test]
    fn test_round_trip_survives_sub_pixel_spacing() {
        // bias / spacing must stay at or below 0.5 or half-up rounding would
        // resolve every tick-aligned offset to the next tick over
        for spacing in [0.5_f32, 0.8, 1.0, 2.0] {
            let mapper = OffsetMapper::new(spacing, 50.0);
            for i in 0..101 {
                assert_eq!(
                    mapper.index_for_offset(mapper.offset_for_index(i), 101),
                    i,
                    "spacing {spacing}"
                );
            }
        }
    }

    #[test]
    fn test_offsets_are_monotone_in_index() {
        let mapper = OffsetMapper::new(12.5, 160.0);
        for i in 0..100 {
            assert!(mapper.offset_for_index(i) < mapper.offset_for_index(i + 1));
        }
    }

    #[test]
    fn test_known_offset_values() {
        // tick_spacing = 20, leading_inset = 50:
        // offset_for_index(3) = 3 * 20 - 50 + 0.5 = 10.5
        let mapper = OffsetMapper::new(20.0, 50.0);
        assert_eq!(mapper.offset_for_index(3), 10.5);
        assert_eq!(mapper.index_for_offset(10.5, 101), 3);
    }

    #[test]
    fn test_index_is_clamped_for_any_offset() {
        let mapper = OffsetMapper::new(20.0, 50.0);
        assert_eq!(mapper.index_for_offset(-1.0e9, 101), 0);
        assert_eq!(mapper.index_for_offset(1.0e9, 101), 100);
        assert_eq!(mapper.index_for_offset(f32::MIN, 101), 0);
        assert_eq!(mapper.index_for_offset(f32::MAX, 101), 100);
    }

    #[test]
    fn test_half_up_rounding() {
        let mapper = OffsetMapper::new(10.0, 0.0);
        // position 3.5 does not round up; 3.51 does
        assert_eq!(mapper.index_for_offset(35.0, 101), 3);
        assert_eq!(mapper.index_for_offset(35.1, 101), 4);
    }

    #[test]
    fn test_degenerate_spacing_does_not_divide() {
        let mapper = OffsetMapper::new(0.0, 50.0);
        assert_eq!(mapper.index_for_offset(123.0, 101), 0);
        let mapper = OffsetMapper::new(-5.0, 50.0);
        assert_eq!(mapper.index_for_offset(123.0, 101), 0);
    }
}
