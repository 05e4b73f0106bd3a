//! The ordered sequence of selectable values.

/// An immutable, index-addressable series of tick values.
///
/// A series is replaced wholesale when the owner assigns a new data source; it
/// is never mutated in place and never empty. Constructing one from an empty
/// slice falls back to the default integer sequence `0..=100`.
#[derive(Clone, Debug, PartialEq)]
pub struct TickSeries {
    values: Vec<f64>,
}

impl Default for TickSeries {
    fn default() -> Self {
        Self {
            values: (0..=100).map(f64::from).collect(),
        }
    }
}

impl TickSeries {
    /// Build a series from consumer-supplied values, substituting the default
    /// sequence when the input is empty.
    pub fn from_values(values: Vec<f64>) -> Self {
        if values.is_empty() {
            Self::default()
        } else {
            Self { values }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        // Upheld by construction, but the accessor keeps clippy honest.
        self.values.is_empty()
    }

    /// Value at a tick index. Callers clamp through the mapper first.
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
