//! Overflow-safe sample math shared by every stage.
//!
//! All intermediate values are carried in `i32`; results are hard-clipped to
//! the signed 16-bit range before they leave these helpers.

use crate::frame::StereoFrame;

use super::intrinsics::{saturate16, signed_saturate_rshift};

/// Unity gain in Q15 (1.0). Does not fit an `i16`, so gains are `i32`.
pub const UNITY_Q15: i32 = 1 << 15;

/// Scale `sample` by a Q15 gain in `0..=UNITY_Q15`.
#[inline(always)]
pub fn apply_gain_q15(sample: i16, gain: i32) -> i16 {
    signed_saturate_rshift::<16, 15>(sample as i32 * gain) as i16
}

/// Linear crossfade between `dry` and `wet`; `wet_percent` is `0..=100`.
///
/// `0` returns `dry` and `100` returns `wet` exactly.
#[inline]
pub fn mix_dry_wet(dry: i16, wet: i16, wet_percent: u8) -> i16 {
    let wet_percent = wet_percent.min(100) as i32;
    let sum = dry as i32 * (100 - wet_percent) + wet as i32 * wet_percent;
    saturate16(sum / 100)
}

/// Linear interpolation from `a` towards `b` by a Q15 fraction in
/// `0..=UNITY_Q15`.
#[inline]
pub fn interpolate_q15(a: i16, b: i16, frac: i32) -> i16 {
    let delta = b as i32 - a as i32;
    saturate16(a as i32 + ((delta * frac) >> 15))
}

/// Trapezoidal window gain (Q15) for position `pos` in a loop of `len` frames.
///
/// `shape` in `0.0..=1.0` is the share of the loop spent fading: half of it
/// fades in at the start, half fades out at the end. `1.0` is a triangle.
pub fn window_gain_q15(pos: usize, len: usize, shape: f32) -> i32 {
    if shape <= 0.0 || len == 0 {
        return UNITY_Q15;
    }
    let fade = (len as f32 * shape * 0.5) as usize;
    if fade == 0 {
        return UNITY_Q15;
    }
    let ramp = |n: usize| ((n.min(fade) as u64 * UNITY_Q15 as u64) / fade as u64) as i32;

    if pos < fade {
        ramp(pos)
    } else if pos + fade >= len {
        ramp(len.saturating_sub(pos))
    } else {
        UNITY_Q15
    }
}

/// [`mix_dry_wet`] applied to both channels.
#[inline]
pub fn mix_frames(dry: StereoFrame, wet: StereoFrame, wet_percent: u8) -> StereoFrame {
    StereoFrame {
        left: mix_dry_wet(dry.left, wet.left, wet_percent),
        right: mix_dry_wet(dry.right, wet.right, wet_percent),
    }
}

/// [`interpolate_q15`] applied to both channels.
#[inline]
pub fn interpolate_frames(a: StereoFrame, b: StereoFrame, frac: i32) -> StereoFrame {
    StereoFrame {
        left: interpolate_q15(a.left, b.left, frac),
        right: interpolate_q15(a.right, b.right, frac),
    }
}

/// [`apply_gain_q15`] applied to both channels.
#[inline]
pub fn gain_frame(frame: StereoFrame, gain: i32) -> StereoFrame {
    if gain == UNITY_Q15 {
        return frame;
    }
    StereoFrame {
        left: apply_gain_q15(frame.left, gain),
        right: apply_gain_q15(frame.right, gain),
    }
}
