//! Beat-repeat effect: parameters, gate generator and the engine itself.

mod beat_repeat;
mod params;
mod rng;

pub use beat_repeat::{BeatRepeat, BeatRepeatState};
pub use params::{
    BeatRepeatParams, PitchMode, CLOCK_DIVIDERS, MAX_PITCH_SHIFT, MAX_REPEAT_COUNT,
    MIN_PITCH_SHIFT, MIN_REPEAT_COUNT,
};
pub use rng::Lcg;
