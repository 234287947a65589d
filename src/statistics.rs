//! # Pilot heater windowed statistics
//!
//! Running mean over the most recent samples of a fixed window. Used to
//! smooth the room temperature between two control cycles and to average
//! the medium and long term heating energy.

use heapless::HistoryBuffer;

/// Fixed-capacity window of samples with an O(1) mean.
///
/// The running sum follows every push: once the window is full the oldest
/// sample is subtracted before it is overwritten, so `sum()` is always the
/// sum of the current contents (up to floating-point rounding).
pub struct WindowedAverage<const N: usize> {
    window: HistoryBuffer<f32, N>,
    sum: f32,
}

impl<const N: usize> WindowedAverage<N> {
    const NON_EMPTY: () = assert!(N > 0, "window capacity must be non-zero");

    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            window: HistoryBuffer::new(),
            sum: 0.,
        }
    }

    /// Add a sample, evicting the oldest one if the window is full.
    pub fn push(&mut self, value: f32) {
        if self.window.len() == self.window.capacity() {
            if let Some(oldest) = self.window.oldest_ordered().next() {
                self.sum -= *oldest;
            }
        }
        self.window.write(value);
        self.sum += value;
    }

    /// Mean of the window, or `default` if no sample was pushed yet.
    pub fn mean(&self, default: f32) -> f32 {
        if self.is_empty() {
            default
        } else {
            self.sum / self.len() as f32
        }
    }

    pub fn sum(&self) -> f32 {
        self.sum
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.window.len() == self.window.capacity()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for WindowedAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}
