//! Compile-time audio configuration.

/// Output sample rate in Hz (A2DP SBC streams are 44.1 kHz stereo).
pub const AUDIO_SAMPLE_RATE: u32 = 44_100;

/// Ring buffer capacity in stereo frames (one second of audio).
pub const RING_BUFFER_FRAMES: usize = AUDIO_SAMPLE_RATE as usize;

/// Frames per DMA transfer buffer. Two of these make up the ping-pong pair.
pub const DMA_BUFFER_FRAMES: usize = 512;

/// Interval between buffer status log lines in the foreground loop.
pub const STATUS_LOG_INTERVAL_MS: u32 = 5_000;

/// Capacity of the beat-repeat capture buffer in stereo frames (one second).
pub const MAX_SLICE_FRAMES: usize = AUDIO_SAMPLE_RATE as usize;

/// Shortest regular slice, about 3 ms at 44.1 kHz.
pub const MIN_SLICE_FRAMES: usize = 128;

/// Shortest stutter slice.
pub const MIN_STUTTER_FRAMES: usize = 64;
