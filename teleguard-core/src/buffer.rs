//! Fixed-Size History Buffer for Accepted Measurements
//!
//! ## Overview
//!
//! Each channel keeps a short window of the values it most recently
//! accepted. The window feeds two decisions:
//! - the monotonic check compares against the newest entry
//! - the outlier check compares against the median of the whole window
//!
//! Storage is a fixed array sized at compile time through const generics,
//! while the *capacity* actually used is chosen at runtime (from
//! configuration) and may be anything in `1..=N`.
//!
//! ### Memory Layout
//!
//! ```text
//! HistoryBuffer<8> with capacity 5:
//! ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//! │  0  │  1  │  2  │  3  │  4  │  -  │  -  │  -  │  ← only 0..capacity used
//! └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!    ↑
//!    └── write_pos wraps at capacity, not at N
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use teleguard_core::buffer::HistoryBuffer;
//!
//! let mut history: HistoryBuffer<32> = HistoryBuffer::with_capacity(3);
//! history.push(100);
//! history.push(101);
//! history.push(99);
//! history.push(102); // evicts 100
//!
//! assert_eq!(history.last(), Some(102));
//! assert_eq!(history.median(), Some(101.0));
//! ```

use heapless::Vec;

/// Fixed-storage ring of the most recently accepted values
///
/// ## Internal Invariants
///
/// - `1 <= capacity <= N`
/// - `write_pos < capacity`
/// - `len <= capacity`
/// - Iteration yields values oldest to newest
#[derive(Debug, Clone)]
pub struct HistoryBuffer<const N: usize> {
    data: [u64; N],
    write_pos: usize,
    len: usize,
    capacity: usize,
}

impl<const N: usize> HistoryBuffer<N> {
    /// Create an empty buffer using the full storage as capacity
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            write_pos: 0,
            len: 0,
            capacity: N,
        }
    }

    /// Create an empty buffer holding at most `capacity` values
    ///
    /// Capacity is clamped into `1..=N`; callers that need to reject bad
    /// capacities validate them beforehand (see `PipelineConfig::validate`).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.clamp(1, N),
            ..Self::new()
        }
    }

    /// Append a value, evicting the oldest when full
    pub fn push(&mut self, value: u64) {
        self.data[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.capacity;

        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently appended value
    pub fn last(&self) -> Option<u64> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { self.capacity - 1 } else { self.write_pos - 1 };
        Some(self.data[idx])
    }

    /// Iterate over values from oldest to newest
    pub fn iter(&self) -> HistoryIter<'_, N> {
        HistoryIter { buffer: self, index: 0 }
    }

    /// Median of the stored values
    ///
    /// For an even count this is the mean of the two middle values, so the
    /// result is not necessarily one of the stored integers.
    pub fn median(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let mut sorted: Vec<u64, N> = self.iter().collect();
        sorted.sort_unstable();

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            Some(sorted[mid] as f64)
        } else {
            Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
        }
    }

    /// Drop all values, keeping the capacity
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Value at logical index (0 = oldest)
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2, full)
    /// Logical:   [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % capacity]
    /// ```
    fn get(&self, index: usize) -> Option<u64> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < self.capacity {
            index
        } else {
            (self.write_pos + index) % self.capacity
        };

        Some(self.data[actual_index])
    }
}

/// Iterator over history contents, oldest first
pub struct HistoryIter<'a, const N: usize> {
    buffer: &'a HistoryBuffer<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for HistoryIter<'a, N> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.buffer.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<const N: usize> Default for HistoryBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
