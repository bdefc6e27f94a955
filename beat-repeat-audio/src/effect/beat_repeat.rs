//! Beat-repeat slicing effect.
//!
//! The engine keeps recording the incoming stream into a capture buffer. Each
//! time a full slice has been captured, a weighted coin flip decides whether
//! that slice is replayed. While replaying, the captured slice is held and
//! played back `repeat_count` times with optional pitch, reverse, window and
//! loop modulation, crossfaded with the dry input.
//!
//! ```text
//!            capture (not repeating)           playback (repeating)
//! dry ──┬──► slice[write_position] ──┐   ┌──► slice[start + read_position]
//!       │                            └───┘          │ interpolate, window
//!       └──────────────────────────────────► mix ◄──┘
//! ```
//!
//! All work happens per frame inside [`process`](BeatRepeat::process); nothing
//! allocates and nothing blocks.

use core::f32::consts::TAU;

use crate::dsp::{gain_frame, interpolate_frames, mix_frames, window_gain_q15, UNITY_Q15};
use crate::frame::StereoFrame;

use super::params::{BeatRepeatParams, PitchMode, MAX_PITCH_SHIFT, MIN_PITCH_SHIFT};
use super::rng::Lcg;

/// Depth of the sinusoidal rate wobble in [`PitchMode::Scratch`].
const SCRATCH_DEPTH: f32 = 0.9;

/// Mutable per-stream state of the engine.
pub struct BeatRepeatState<const S: usize> {
    /// Captured frames; only the first `active_slice_length` are in use.
    slice: [StereoFrame; S],
    /// Capture cursor, always `< S`.
    write_position: usize,
    /// Playback cursor relative to the loop start, fractional for pitch.
    read_position: f32,
    /// Completed passes through the current loop.
    repeat_counter: u32,
    is_repeating: bool,
    /// Phase of the scratch modulation, radians in `[0, TAU)`.
    pitch_modulation_phase: f32,
    /// Loop size relative to its initial size; shrinks with loop decay.
    loop_scale: f32,
    rng: Lcg,
}

impl<const S: usize> BeatRepeatState<S> {
    pub const fn new() -> Self {
        assert!(S >= 1, "capture buffer must hold at least one frame");

        BeatRepeatState {
            slice: [StereoFrame::SILENCE; S],
            write_position: 0,
            read_position: 0.0,
            repeat_counter: 0,
            is_repeating: false,
            pitch_modulation_phase: 0.0,
            loop_scale: 1.0,
            rng: Lcg::new(Lcg::DEFAULT_SEED),
        }
    }

    fn clear(&mut self) {
        self.slice.fill(StereoFrame::SILENCE);
        self.write_position = 0;
        self.read_position = 0.0;
        self.repeat_counter = 0;
        self.is_repeating = false;
        self.pitch_modulation_phase = 0.0;
        self.loop_scale = 1.0;
        self.rng = Lcg::default();
    }

    fn begin_repeat(&mut self) {
        self.is_repeating = true;
        self.read_position = 0.0;
        self.repeat_counter = 0;
        self.pitch_modulation_phase = 0.0;
        self.loop_scale = 1.0;
    }

    fn end_repeat(&mut self) {
        self.is_repeating = false;
        self.repeat_counter = 0;
        self.read_position = 0.0;
        self.write_position = 0;
    }

    /// The captured frames.
    pub fn slice(&self) -> &[StereoFrame] {
        &self.slice
    }

    pub fn write_position(&self) -> usize {
        self.write_position
    }

    pub fn read_position(&self) -> f32 {
        self.read_position
    }

    pub fn repeat_counter(&self) -> u32 {
        self.repeat_counter
    }

    pub fn is_repeating(&self) -> bool {
        self.is_repeating
    }

    pub fn pitch_modulation_phase(&self) -> f32 {
        self.pitch_modulation_phase
    }
}

impl<const S: usize> Default for BeatRepeatState<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Beat-repeat effect engine with a capture buffer of `S` stereo frames.
///
/// Construct it in a `static` on target hardware; at one second of capture the
/// state is far too large for an interrupt or task stack.
///
/// # Example
/// ```ignore
/// let mut fx: BeatRepeat<44_100> = BeatRepeat::new(44_100);
/// fx.set_params(BeatRepeatParams { repeat_count: 8, ..fx.params() });
///
/// // From the decoder callback, interleaved L/R in place:
/// fx.process(samples, frame_count, 2);
/// ```
pub struct BeatRepeat<const S: usize> {
    params: BeatRepeatParams,
    state: BeatRepeatState<S>,
    sample_rate: u32,
}

impl<const S: usize> BeatRepeat<S> {
    /// Create an engine with factory defaults for `sample_rate`.
    pub const fn new(sample_rate: u32) -> Self {
        BeatRepeat {
            params: BeatRepeatParams::defaults_for(sample_rate, S),
            state: BeatRepeatState::new(),
            sample_rate,
        }
    }

    /// Validate, clamp and store a new parameter snapshot.
    ///
    /// Call between blocks only; a block is always processed with one
    /// snapshot.
    pub fn set_params(&mut self, params: BeatRepeatParams) {
        let clamped = params.clamped(S);
        #[cfg(feature = "defmt")]
        if clamped != params {
            defmt::warn!("beat-repeat: params clamped {} -> {}", params, clamped);
        }
        self.params = clamped;
    }

    /// The last validated parameter snapshot.
    pub fn params(&self) -> BeatRepeatParams {
        self.params
    }

    pub fn state(&self) -> &BeatRepeatState<S> {
        &self.state
    }

    pub fn is_repeating(&self) -> bool {
        self.state.is_repeating
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Clear the capture buffer and all playback state. Parameters are kept.
    pub fn reset(&mut self) {
        self.state.clear();
        #[cfg(feature = "defmt")]
        defmt::debug!("beat-repeat: reset");
    }

    /// Process `frame_count` interleaved stereo frames of `samples` in place.
    ///
    /// Anything other than two channels is left untouched, as is every block
    /// while the effect is disabled. `frame_count` is limited to what
    /// `samples` actually holds.
    pub fn process(&mut self, samples: &mut [i16], frame_count: usize, channel_count: u8) {
        if channel_count != 2 {
            #[cfg(feature = "defmt")]
            defmt::trace!("beat-repeat: skipping {}-channel block", channel_count);
            return;
        }
        if !self.params.enabled {
            return;
        }

        let frames = frame_count.min(samples.len() / 2);
        for pair in samples[..frames * 2].chunks_exact_mut(2) {
            let out = self.process_frame(StereoFrame::new(pair[0], pair[1]));
            pair[0] = out.left;
            pair[1] = out.right;
        }
    }

    /// Process a block of frames in place; pass-through while disabled.
    pub fn process_frames(&mut self, block: &mut [StereoFrame]) {
        if !self.params.enabled {
            return;
        }
        for frame in block.iter_mut() {
            *frame = self.process_frame(*frame);
        }
    }

    /// Run one frame through the effect and return the output frame.
    pub fn process_frame(&mut self, dry: StereoFrame) -> StereoFrame {
        let active_len = self.active_slice_length();

        if !self.state.is_repeating {
            self.capture(dry, active_len);
            return dry;
        }

        let wet = self.play(active_len);
        mix_frames(dry, wet, self.params.wet_mix)
    }

    /// Effective loop size in frames for the current parameters.
    pub fn active_slice_length(&self) -> usize {
        let base = if self.params.stutter_enabled {
            self.params.stutter_length
        } else {
            self.params.slice_length
        } as usize;
        (base / self.params.clock_divider as usize).clamp(1, S)
    }

    fn capture(&mut self, dry: StereoFrame, active_len: usize) {
        let state = &mut self.state;
        state.slice[state.write_position] = dry;
        state.write_position += 1;

        if state.write_position >= active_len {
            state.write_position = 0;
            // The generator only advances when a gate is actually evaluated.
            if !self.params.freeze && state.rng.chance(self.params.probability) {
                state.begin_repeat();
            }
        }
    }

    fn play(&mut self, active_len: usize) -> StereoFrame {
        let params = self.params;

        let start = ((params.loop_start * active_len as f32) as usize).min(active_len - 1);
        let base_len = active_len - start;
        let min_len = (base_len / 10).max(1);
        let loop_len = ((base_len as f32 * self.state.loop_scale) as usize).clamp(min_len, base_len);

        let state = &mut self.state;
        // The loop may have shrunk under us after a parameter change.
        if state.read_position >= loop_len as f32 {
            state.read_position = 0.0;
        }

        let ratio = pitch_ratio(params, state, loop_len);

        let offset = if params.reverse {
            ((loop_len - 1) as f32 - state.read_position).max(0.0)
        } else {
            state.read_position
        };
        let index = (offset as usize).min(loop_len - 1);
        let frac = ((offset - index as f32) * UNITY_Q15 as f32) as i32;

        let current = state.slice[start + index];
        let wet = if frac > 0 && index + 1 < loop_len {
            interpolate_frames(current, state.slice[start + index + 1], frac)
        } else {
            current
        };
        let gain = window_gain_q15(state.read_position as usize, loop_len, params.window_shape);
        let wet = gain_frame(wet, gain);

        state.read_position += ratio;
        if state.read_position >= loop_len as f32 {
            if params.freeze {
                state.read_position = 0.0;
            } else {
                state.repeat_counter += 1;
                state.read_position = 0.0;
                state.loop_scale *= 1.0 - params.loop_size_decay;
                if state.repeat_counter >= params.repeat_count as u32 {
                    state.end_repeat();
                }
            }
        }

        wet
    }
}

/// Playback-rate multiplier for the current position in the loop.
fn pitch_ratio<const S: usize>(
    params: BeatRepeatParams,
    state: &mut BeatRepeatState<S>,
    loop_len: usize,
) -> f32 {
    let progress = state.read_position / loop_len as f32;
    let ratio = match params.pitch_mode {
        PitchMode::Fixed => params.pitch_shift,
        PitchMode::RampUp => params.pitch_shift * (0.5 + progress),
        PitchMode::RampDown => params.pitch_shift * (1.5 - progress),
        PitchMode::Scratch => {
            let wobble = libm::sinf(state.pitch_modulation_phase);
            state.pitch_modulation_phase += TAU / loop_len as f32;
            if state.pitch_modulation_phase >= TAU {
                state.pitch_modulation_phase -= TAU;
            }
            params.pitch_shift * (1.0 + SCRATCH_DEPTH * wobble)
        }
    };
    ratio.clamp(MIN_PITCH_SHIFT, MAX_PITCH_SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parameters that make the engine deterministic and transparent:
    /// always trigger, fully wet, no window, unit pitch.
    fn plain(slice_length: u32, repeat_count: u8) -> BeatRepeatParams {
        BeatRepeatParams {
            enabled: true,
            slice_length,
            repeat_count,
            wet_mix: 100,
            pitch_shift: 1.0,
            reverse: false,
            stutter_enabled: false,
            stutter_length: slice_length,
            window_shape: 0.0,
            loop_start: 0.0,
            loop_size_decay: 0.0,
            probability: 1.0,
            clock_divider: 1,
            pitch_mode: PitchMode::Fixed,
            freeze: false,
        }
    }

    fn run<const S: usize>(fx: &mut BeatRepeat<S>, input: &[i16], out: &mut [i16]) {
        for (i, &s) in input.iter().enumerate() {
            out[i] = fx.process_frame(StereoFrame::mono(s)).left;
        }
    }

    #[test]
    fn repeats_captured_slice_once() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(plain(4, 1));

        let input = [1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut out = [99i16; 12];
        run(&mut fx, &input, &mut out);

        assert_eq!(&out[0..4], &[1, 2, 3, 4], "capture passes dry audio");
        assert_eq!(&out[4..8], &[1, 2, 3, 4], "one full repeat");
        assert_eq!(&out[8..12], &[0, 0, 0, 0], "back to dry silence");
        // the silent slice completed and triggered in turn
        assert!(fx.is_repeating());
    }

    #[test]
    fn repeat_count_controls_passes() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(plain(4, 3));

        let mut input = [0i16; 20];
        input[..4].copy_from_slice(&[5, 6, 7, 8]);
        let mut out = [0i16; 20];
        run(&mut fx, &input, &mut out);

        assert_eq!(&out[4..8], &[5, 6, 7, 8]);
        assert_eq!(&out[8..12], &[5, 6, 7, 8]);
        assert_eq!(&out[12..16], &[5, 6, 7, 8]);
        assert_eq!(&out[16..20], &[0, 0, 0, 0]);
    }

    #[test]
    fn disabled_is_bit_exact_passthrough() {
        let mut fx: BeatRepeat<64> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            enabled: false,
            ..plain(8, 4)
        });

        let mut samples = [0i16; 256];
        for (i, s) in samples.iter_mut().enumerate() {
            *s = (i as i16).wrapping_mul(977);
        }
        let original = samples;
        fx.process(&mut samples, 128, 2);
        assert_eq!(samples, original);
        assert_eq!(fx.state().write_position(), 0);
    }

    #[test]
    fn non_stereo_block_is_untouched() {
        let mut fx: BeatRepeat<8> = BeatRepeat::new(44_100);
        fx.set_params(plain(4, 4));

        let mut samples = [7i16; 32];
        fx.process(&mut samples, 32, 1);
        fx.process(&mut samples, 10, 3);
        assert!(samples.iter().all(|&s| s == 7));
        assert_eq!(fx.state().write_position(), 0);
    }

    #[test]
    fn frame_count_is_limited_by_slice_length() {
        let mut fx: BeatRepeat<8> = BeatRepeat::new(44_100);
        fx.set_params(plain(8, 1));

        let mut samples = [1i16; 6];
        fx.process(&mut samples, 1000, 2);
        assert_eq!(fx.state().write_position(), 3);
    }

    #[test]
    fn zero_wet_mix_is_dry() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            wet_mix: 0,
            ..plain(4, 4)
        });

        let input = [100, -200, 300, -400, 11, 12, 13, 14, 15, 16, 17, 18];
        let mut out = [0i16; 12];
        run(&mut fx, &input, &mut out);
        assert_eq!(out, input);
    }

    #[test]
    fn half_wet_mix_blends() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            wet_mix: 50,
            ..plain(4, 1)
        });

        let input = [1000, 1000, 1000, 1000, 0, 0, 0, 0];
        let mut out = [0i16; 8];
        run(&mut fx, &input, &mut out);
        assert_eq!(&out[4..8], &[500, 500, 500, 500]);
    }

    #[test]
    fn reverse_plays_backwards() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            reverse: true,
            ..plain(4, 1)
        });

        let input = [1, 2, 3, 4, 0, 0, 0, 0];
        let mut out = [0i16; 8];
        run(&mut fx, &input, &mut out);
        assert_eq!(&out[4..8], &[4, 3, 2, 1]);
    }

    #[test]
    fn double_pitch_plays_twice_as_fast() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            pitch_shift: 2.0,
            ..plain(4, 2)
        });

        let input = [10, 20, 30, 40, 0, 0, 0, 0, 0];
        let mut out = [0i16; 9];
        run(&mut fx, &input, &mut out);
        // two passes of two frames each, then dry
        assert_eq!(&out[4..9], &[10, 30, 10, 30, 0]);
    }

    #[test]
    fn half_pitch_interpolates() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            pitch_shift: 0.5,
            ..plain(4, 1)
        });

        let input = [0, 100, 200, 300, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut out = [0i16; 12];
        run(&mut fx, &input, &mut out);
        // last frame of the loop holds its value instead of reading past the end
        assert_eq!(&out[4..12], &[0, 50, 100, 150, 200, 250, 300, 300]);
    }

    #[test]
    fn zero_probability_never_triggers() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            probability: 0.0,
            ..plain(4, 4)
        });

        for i in 0..400 {
            let dry = StereoFrame::mono(i as i16);
            assert_eq!(fx.process_frame(dry), dry);
        }
        assert!(!fx.is_repeating());
    }

    #[test]
    fn freeze_loops_forever() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(plain(4, 1));

        let input = [1, 2, 3, 4];
        let mut out = [0i16; 4];
        run(&mut fx, &input, &mut out);
        assert!(fx.is_repeating());

        fx.set_params(BeatRepeatParams {
            freeze: true,
            ..plain(4, 1)
        });
        let silence = [0i16; 40];
        let mut held = [0i16; 40];
        run(&mut fx, &silence, &mut held);
        for chunk in held.chunks_exact(4) {
            assert_eq!(chunk, &[1, 2, 3, 4]);
        }
        assert!(fx.is_repeating());
        assert_eq!(fx.state().repeat_counter(), 0);

        // releasing freeze lets the repeat finish
        fx.set_params(plain(4, 1));
        run(&mut fx, &[0; 4], &mut out);
        assert!(!fx.is_repeating());
    }

    #[test]
    fn freeze_suppresses_new_triggers() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            freeze: true,
            ..plain(4, 1)
        });
        for _ in 0..32 {
            fx.process_frame(StereoFrame::mono(1));
        }
        assert!(!fx.is_repeating());
    }

    #[test]
    fn clock_divider_shortens_slice() {
        let mut fx: BeatRepeat<8> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            clock_divider: 2,
            ..plain(8, 1)
        });
        assert_eq!(fx.active_slice_length(), 4);

        let input = [1, 2, 3, 4, 0, 0, 0, 0];
        let mut out = [0i16; 8];
        run(&mut fx, &input, &mut out);
        assert_eq!(&out[4..8], &[1, 2, 3, 4]);
    }

    #[test]
    fn stutter_length_takes_over() {
        let mut fx: BeatRepeat<8> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            stutter_enabled: true,
            stutter_length: 2,
            ..plain(8, 2)
        });
        // clamped up to the stutter minimum for an 8-frame buffer
        assert_eq!(fx.active_slice_length(), 8);

        fx.set_params(BeatRepeatParams {
            stutter_enabled: true,
            stutter_length: 8,
            clock_divider: 4,
            ..plain(8, 2)
        });
        assert_eq!(fx.active_slice_length(), 2);

        let input = [9, 8, 0, 0, 0, 0, 0];
        let mut out = [0i16; 7];
        run(&mut fx, &input, &mut out);
        assert_eq!(&out[2..7], &[9, 8, 9, 8, 0]);
    }

    #[test]
    fn loop_start_skips_head_of_slice() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            loop_start: 0.5,
            ..plain(4, 2)
        });

        let input = [1, 2, 3, 4, 0, 0, 0, 0, 0];
        let mut out = [0i16; 9];
        run(&mut fx, &input, &mut out);
        assert_eq!(&out[4..9], &[3, 4, 3, 4, 0]);
    }

    #[test]
    fn loop_decay_shrinks_until_floor() {
        let mut fx: BeatRepeat<20> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            loop_size_decay: 0.5,
            ..plain(20, 3)
        });

        let mut input = [0i16; 20];
        for (i, s) in input.iter_mut().enumerate() {
            *s = i as i16 + 1;
        }
        let mut out = [0i16; 20];
        run(&mut fx, &input, &mut out);
        assert!(fx.is_repeating());

        // passes of 20, 10 and 5 frames
        let mut played = [0i16; 35];
        run(&mut fx, &[0; 35], &mut played);
        assert_eq!(played[0], 1);
        assert_eq!(played[19], 20);
        assert_eq!(&played[20..30], &input[..10]);
        assert_eq!(&played[30..35], &input[..5]);
        assert!(!fx.is_repeating());
    }

    #[test]
    fn window_fades_loop_edges() {
        let mut fx: BeatRepeat<8> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            window_shape: 0.5,
            ..plain(8, 1)
        });

        let input = [1000i16; 8];
        let mut out = [0i16; 8];
        run(&mut fx, &input, &mut out);
        let mut played = [0i16; 8];
        run(&mut fx, &[1000; 8], &mut played);
        // fade of 2 frames at each end
        assert_eq!(played, [0, 500, 1000, 1000, 1000, 1000, 1000, 500]);
    }

    #[test]
    fn scratch_mode_advances_phase() {
        let mut fx: BeatRepeat<64> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            pitch_mode: PitchMode::Scratch,
            ..plain(64, 16)
        });
        for i in 0..64 {
            fx.process_frame(StereoFrame::mono(i));
        }
        assert!(fx.is_repeating());
        fx.process_frame(StereoFrame::SILENCE);
        assert!(fx.state().pitch_modulation_phase() > 0.0);
        assert!(fx.state().read_position() > 1.0 - 1e-6);
    }

    #[test]
    fn ramp_modes_change_rate_over_loop() {
        let mut up: BeatRepeat<64> = BeatRepeat::new(44_100);
        up.set_params(BeatRepeatParams {
            pitch_mode: PitchMode::RampUp,
            ..plain(64, 4)
        });
        let mut down: BeatRepeat<64> = BeatRepeat::new(44_100);
        down.set_params(BeatRepeatParams {
            pitch_mode: PitchMode::RampDown,
            ..plain(64, 4)
        });
        for i in 0..64 {
            up.process_frame(StereoFrame::mono(i));
            down.process_frame(StereoFrame::mono(i));
        }
        // first playback frame: ramp up starts slow, ramp down starts fast
        up.process_frame(StereoFrame::SILENCE);
        down.process_frame(StereoFrame::SILENCE);
        assert_eq!(up.state().read_position(), 0.5);
        assert_eq!(down.state().read_position(), 1.5);
    }

    #[test]
    fn extreme_mix_stays_in_range() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            wet_mix: 50,
            ..plain(4, 1)
        });
        let input = [i16::MAX, i16::MAX, i16::MAX, i16::MAX, i16::MAX, i16::MIN];
        let mut out = [0i16; 6];
        run(&mut fx, &input, &mut out);
        assert_eq!(out[4], i16::MAX);
        assert_eq!(out[5], 0);
    }

    #[test]
    fn reset_clears_state_but_keeps_params() {
        let mut fx: BeatRepeat<4> = BeatRepeat::new(44_100);
        let params = plain(4, 2);
        fx.set_params(params);
        run(&mut fx, &[1, 2, 3, 4, 5], &mut [0; 5]);
        assert!(fx.is_repeating());

        fx.reset();
        assert!(!fx.is_repeating());
        assert_eq!(fx.state().write_position(), 0);
        assert_eq!(fx.state().read_position(), 0.0);
        assert!(fx.state().slice().iter().all(|f| *f == StereoFrame::SILENCE));
        assert_eq!(fx.params(), params);
    }

    #[test]
    fn get_params_returns_clamped_snapshot() {
        let mut fx: BeatRepeat<44_100> = BeatRepeat::new(44_100);
        fx.set_params(BeatRepeatParams {
            pitch_shift: 100.0,
            repeat_count: 0,
            clock_divider: 3,
            ..BeatRepeatParams::default()
        });
        let params = fx.params();
        assert_eq!(params.pitch_shift, 4.0);
        assert_eq!(params.repeat_count, 1);
        assert_eq!(params.clock_divider, 1);
    }
}
