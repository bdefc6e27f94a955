//! Sample math: saturation, packing, mixing, interpolation and windowing.
//!
//! [`intrinsics`] holds the single-instruction primitives (with host
//! fallbacks); [`helpers`] builds the sample- and frame-level operations the
//! effect engine and output stage share.

pub mod intrinsics;
pub mod helpers;

pub use helpers::{
    apply_gain_q15, gain_frame, interpolate_frames, interpolate_q15, mix_dry_wet, mix_frames,
    window_gain_q15, UNITY_Q15,
};
pub use intrinsics::saturate16;
