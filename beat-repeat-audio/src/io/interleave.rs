//! Conversion from decoder sample layout to [`StereoFrame`]s.
//!
//! The decoder hands over interleaved `i16` samples with a runtime channel
//! count. The output path only knows stereo frames:
//!
//! - 1 channel: the sample is duplicated to left and right
//! - 2 channels: `L R L R ...` maps one-to-one
//! - more: the first two channels of each frame are kept

use crate::frame::StereoFrame;

/// Number of whole frames available in `samples` for `channels`, capped at
/// `frame_count`. Zero channels yield zero frames.
pub fn available_frames(samples: &[i16], frame_count: usize, channels: u8) -> usize {
    if channels == 0 {
        return 0;
    }
    frame_count.min(samples.len() / channels as usize)
}

/// Convert interleaved samples starting at frame `first` into `dest`.
///
/// Converts `dest.len()` frames; the caller makes sure they exist (see
/// [`available_frames`]).
///
/// # Panics
///
/// Panics if `samples` holds fewer than `first + dest.len()` frames.
pub fn deinterleave_frames(dest: &mut [StereoFrame], samples: &[i16], first: usize, channels: u8) {
    match channels {
        0 => dest.fill(StereoFrame::SILENCE),
        1 => {
            let end = first + dest.len();
            for (out, &s) in dest.iter_mut().zip(&samples[first..end]) {
                *out = StereoFrame::mono(s);
            }
        }
        n => {
            let stride = n as usize;
            let start = first * stride;
            let src = &samples[start..start + dest.len() * stride];
            for (out, chunk) in dest.iter_mut().zip(src.chunks_exact(stride)) {
                *out = StereoFrame::new(chunk[0], chunk[1]);
            }
        }
    }
}
