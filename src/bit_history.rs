//! # Pilot heater slot history
//!
//! Ring of on/off flags, one per heating slot, packed into 32-bit words.

use crate::error::ConfigurationError;

/// Ring buffer of bits holding up to `capacity` of the most recent slots.
///
/// Storage is `WORDS` words so the window length can be chosen at runtime
/// (it depends on the slot duration) within a static footprint. Bits that
/// were never written are zero, which keeps `ones()` a plain popcount.
#[derive(Clone, Debug)]
pub struct BitWindowHistory<const WORDS: usize> {
    words: [u32; WORDS],
    capacity: usize,
    size: usize,
    write_index: usize,
}

impl<const WORDS: usize> BitWindowHistory<WORDS> {
    /// Largest window the storage can hold.
    pub const MAX_CAPACITY: usize = WORDS * u32::BITS as usize;

    pub fn new(capacity: usize) -> Result<Self, ConfigurationError> {
        if capacity == 0 {
            return Err(ConfigurationError::EmptyWindow);
        }
        if capacity > Self::MAX_CAPACITY {
            return Err(ConfigurationError::WindowTooLarge {
                requested: capacity,
                capacity: Self::MAX_CAPACITY,
            });
        }
        Ok(Self {
            words: [0; WORDS],
            capacity,
            size: 0,
            write_index: 0,
        })
    }

    /// Record a slot, overwriting the oldest one once the window is full.
    pub fn push(&mut self, bit: bool) {
        if self.size < self.capacity {
            self.size += 1;
        }
        let (word, mask) = Self::locate(self.write_index);
        if bit {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
        self.write_index += 1;
        if self.write_index == self.capacity {
            self.write_index = 0;
        }
    }

    /// Bit at `index` counting from the oldest retained slot.
    ///
    /// Indices past the current fill read as `false`.
    pub fn read(&self, index: usize) -> bool {
        if index >= self.size {
            return false;
        }
        let oldest = if self.size < self.capacity {
            0
        } else {
            self.write_index
        };
        let (word, mask) = Self::locate((oldest + index) % self.capacity);
        self.words[word] & mask != 0
    }

    /// Number of set bits in the window.
    pub fn ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Percentage of "on" slots in the window, `None` while it is empty.
    pub fn load_percentage(&self) -> Option<f32> {
        (self.size > 0).then(|| 100. * self.ones() as f32 / self.size as f32)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn locate(index: usize) -> (usize, u32) {
        let bits = u32::BITS as usize;
        (index / bits, 1 << (index % bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_capacity() {
        assert_eq!(
            BitWindowHistory::<2>::new(0).unwrap_err(),
            ConfigurationError::EmptyWindow
        );
        assert_eq!(
            BitWindowHistory::<2>::new(65).unwrap_err(),
            ConfigurationError::WindowTooLarge {
                requested: 65,
                capacity: 64
            }
        );
        assert!(BitWindowHistory::<2>::new(64).is_ok());
    }

    #[test]
    fn empty_window_has_no_load() {
        let history = BitWindowHistory::<1>::new(8).unwrap();
        assert_eq!(history.size(), 0);
        assert_eq!(history.load_percentage(), None);
        assert!(!history.read(0));
    }

    #[test]
    fn load_percentage_of_partial_window() {
        let mut history = BitWindowHistory::<1>::new(10).unwrap();
        for bit in [true, false, true, false] {
            history.push(bit);
        }
        assert_eq!(history.size(), 4);
        assert_eq!(history.ones(), 2);
        assert_eq!(history.load_percentage(), Some(50.));
    }

    #[test]
    fn reads_partial_window_in_push_order() {
        let mut history = BitWindowHistory::<1>::new(8).unwrap();
        for bit in [true, false, true] {
            history.push(bit);
        }
        assert!(history.read(0));
        assert!(!history.read(1));
        assert!(history.read(2));
        assert!(!history.read(3));
        assert_eq!(history.ones(), 2);
    }

    #[test]
    fn reads_from_oldest_after_wrap() {
        let mut history = BitWindowHistory::<1>::new(4).unwrap();
        // 1 1 0 0, then 1 0 overwrite the two oldest slots.
        for bit in [true, true, false, false, true, false] {
            history.push(bit);
        }
        assert_eq!(history.size(), 4);
        let bits: [bool; 4] = core::array::from_fn(|i| history.read(i));
        assert_eq!(bits, [false, false, true, false]);
        assert!(!history.read(4));
        assert_eq!(history.load_percentage(), Some(25.));
    }

    #[test]
    fn window_spanning_several_words() {
        let mut history = BitWindowHistory::<3>::new(80).unwrap();
        for i in 0..200 {
            history.push(i % 4 == 0);
            assert!(history.size() <= history.capacity());
        }
        assert_eq!(history.size(), 80);
        assert_eq!(history.ones(), 20);
        assert_eq!(history.load_percentage(), Some(25.));
        // Slot 120 is the oldest one retained.
        assert!(history.read(0));
        assert!(!history.read(1));
    }
}
