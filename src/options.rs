/// Default size of the membership filter in bits (1 KiB).
pub const DEFAULT_FILTER_BITS: usize = 8192;

/// Construction options shared by every map.
///
/// Options that do not apply to a map are ignored by it. None of them change
/// the observable result of any operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    capacity: usize, // 0 means no pre-sizing
    filter_bits: usize,
    reset_filter_on_clear: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            capacity: 0,
            filter_bits: DEFAULT_FILTER_BITS,
            reset_filter_on_clear: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the backing storage for `capacity` entries.
    pub fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    /// Size of the membership filter of integer-keyed sorted maps.
    ///
    /// Rounded up to a multiple of 64 by the filter, with a minimum of 64.
    pub fn with_filter_bits(self, filter_bits: usize) -> Self {
        Self {
            filter_bits,
            ..self
        }
    }

    /// Whether `clear` on an integer-keyed sorted map also empties its
    /// membership filter. Off by default: the filter keeps every key it has
    /// ever seen.
    pub fn reset_filter_on_clear(self, reset: bool) -> Self {
        Self {
            reset_filter_on_clear: reset,
            ..self
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn filter_bits(&self) -> usize {
        self.filter_bits
    }

    pub fn resets_filter_on_clear(&self) -> bool {
        self.reset_filter_on_clear
    }

    pub(crate) fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
