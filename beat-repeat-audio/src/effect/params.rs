//! Beat-repeat parameter snapshot and its clamping rules.

use crate::constants::{AUDIO_SAMPLE_RATE, MIN_SLICE_FRAMES, MIN_STUTTER_FRAMES};

/// Fewest repeats per triggered slice.
pub const MIN_REPEAT_COUNT: u8 = 1;
/// Most repeats per triggered slice.
pub const MAX_REPEAT_COUNT: u8 = 16;
/// Lowest playback-rate multiplier (two octaves down).
pub const MIN_PITCH_SHIFT: f32 = 0.25;
/// Highest playback-rate multiplier (two octaves up).
pub const MAX_PITCH_SHIFT: f32 = 4.0;
/// Accepted clock divider values; anything else falls back to 1.
pub const CLOCK_DIVIDERS: [u8; 4] = [1, 2, 4, 8];

/// How the playback rate evolves over one pass through the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PitchMode {
    /// Constant `pitch_shift`.
    #[default]
    Fixed,
    /// Rate rises linearly across the loop.
    RampUp,
    /// Rate falls linearly across the loop.
    RampDown,
    /// Sinusoidal rate wobble, one cycle per loop.
    Scratch,
}

/// Snapshot of every beat-repeat control.
///
/// The engine only ever holds a clamped copy (see [`clamped`](Self::clamped)),
/// so any value written through
/// [`BeatRepeat::set_params`](super::BeatRepeat::set_params) results in a
/// valid operating point.
///
/// `#[repr(C)]`: field offsets match the C-side parameter block.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct BeatRepeatParams {
    /// `false` turns the engine into a pass-through.
    pub enabled: bool,
    /// Regular slice length in frames.
    pub slice_length: u32,
    /// Repeats per triggered slice, `1..=16`.
    pub repeat_count: u8,
    /// Wet share of the output in percent, `0..=100`.
    pub wet_mix: u8,
    /// Playback-rate multiplier, `0.25..=4.0`.
    pub pitch_shift: f32,
    /// Play the slice backwards.
    pub reverse: bool,
    /// Use `stutter_length` instead of `slice_length`.
    pub stutter_enabled: bool,
    /// Stutter slice length in frames.
    pub stutter_length: u32,
    /// Share of the loop spent fading in and out, `0.0..=1.0`.
    pub window_shape: f32,
    /// Loop start as a fraction of the slice, `0.0..=1.0`.
    pub loop_start: f32,
    /// Per-repeat loop shrink factor, `0.0..=1.0`.
    pub loop_size_decay: f32,
    /// Chance that a completed slice triggers playback, `0.0..=1.0`.
    pub probability: f32,
    /// Slice length divider, one of `1, 2, 4, 8`.
    pub clock_divider: u8,
    pub pitch_mode: PitchMode,
    /// Hold the current loop indefinitely and suppress new triggers.
    pub freeze: bool,
}

impl BeatRepeatParams {
    /// Factory defaults for the given sample rate and capture capacity:
    /// a 1/16 note at 120 BPM, four repeats, 70 % wet, 5 % window.
    pub const fn defaults_for(sample_rate: u32, capacity: usize) -> Self {
        BeatRepeatParams {
            enabled: true,
            slice_length: clamp_frames(sample_rate / 4, min_slice(capacity), capacity),
            repeat_count: 4,
            wet_mix: 70,
            pitch_shift: 1.0,
            reverse: false,
            stutter_enabled: false,
            stutter_length: clamp_frames(sample_rate / 100, min_stutter(capacity), capacity),
            window_shape: 0.05,
            loop_start: 0.0,
            loop_size_decay: 0.0,
            probability: 1.0,
            clock_divider: 1,
            pitch_mode: PitchMode::Fixed,
            freeze: false,
        }
    }

    /// Clamp every field independently for a capture buffer of `capacity`
    /// frames. Never fails.
    pub fn clamped(self, capacity: usize) -> Self {
        BeatRepeatParams {
            enabled: self.enabled,
            slice_length: clamp_frames(self.slice_length, min_slice(capacity), capacity),
            repeat_count: self.repeat_count.clamp(MIN_REPEAT_COUNT, MAX_REPEAT_COUNT),
            wet_mix: self.wet_mix.min(100),
            pitch_shift: clamp_f32(self.pitch_shift, MIN_PITCH_SHIFT, MAX_PITCH_SHIFT, 1.0),
            reverse: self.reverse,
            stutter_enabled: self.stutter_enabled,
            stutter_length: clamp_frames(self.stutter_length, min_stutter(capacity), capacity),
            window_shape: clamp_f32(self.window_shape, 0.0, 1.0, 0.0),
            loop_start: clamp_f32(self.loop_start, 0.0, 1.0, 0.0),
            loop_size_decay: clamp_f32(self.loop_size_decay, 0.0, 1.0, 0.0),
            probability: clamp_f32(self.probability, 0.0, 1.0, 0.0),
            clock_divider: if CLOCK_DIVIDERS.contains(&self.clock_divider) {
                self.clock_divider
            } else {
                1
            },
            pitch_mode: self.pitch_mode,
            freeze: self.freeze,
        }
    }
}

impl Default for BeatRepeatParams {
    fn default() -> Self {
        Self::defaults_for(AUDIO_SAMPLE_RATE, crate::constants::MAX_SLICE_FRAMES)
    }
}

const fn min_slice(capacity: usize) -> usize {
    if capacity < MIN_SLICE_FRAMES {
        capacity
    } else {
        MIN_SLICE_FRAMES
    }
}

const fn min_stutter(capacity: usize) -> usize {
    if capacity < MIN_STUTTER_FRAMES {
        capacity
    } else {
        MIN_STUTTER_FRAMES
    }
}

const fn clamp_frames(value: u32, min: usize, max: usize) -> u32 {
    let max = if max > u32::MAX as usize { u32::MAX } else { max as u32 };
    let min = if min as u32 > max { max } else { min as u32 };
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp `value` into `[min, max]`; NaN has no nearest bound and maps to
/// `fallback`.
fn clamp_f32(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
