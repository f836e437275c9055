//! Buffer Sizes and Memory Constraints
//!
//! All buffers in the core are fixed-capacity so the hot path never
//! allocates.

// ===== HISTORY =====

/// Default number of accepted samples kept per channel.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Storage reserved per channel history window.
///
/// The configured capacity may be anything in `1..=MAX_HISTORY_SIZE`:
/// - 32 samples × 8 bytes/sample = 256 bytes per channel
/// - 3 channels = under 1KB of history in total
pub const MAX_HISTORY_SIZE: usize = 32;

// ===== FRAMES =====

/// Longest raw line accepted by the frame parser (bytes after decoding).
///
/// Teleinfo groups are a label, an optional horodate, a value and a
/// checksum; anything longer than this is line noise.
pub const MAX_FRAME_LEN: usize = 128;

// ===== CHANNELS =====

/// Slots in the per-channel state map.
///
/// Must be a power of two for `heapless::FnvIndexMap` and at least the
/// number of channel variants.
pub const CHANNEL_SLOTS: usize = 4;
