//! Stereo frame type and the hardware word layout.
//!
//! A [`StereoFrame`] is the atomic unit moved through the pipeline. The output
//! hardware consumes one `u32` per frame:
//!
//! ```text
//!  31            16 15             0
//! ┌────────────────┬────────────────┐
//! │  left  (i16)   │  right (i16)   │
//! └────────────────┴────────────────┘
//! ```

use crate::dsp::intrinsics::pack_16b_16b;

/// One left/right sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct StereoFrame {
    pub left: i16,
    pub right: i16,
}

impl StereoFrame {
    /// Digital silence on both channels.
    pub const SILENCE: StereoFrame = StereoFrame { left: 0, right: 0 };

    pub const fn new(left: i16, right: i16) -> Self {
        StereoFrame { left, right }
    }

    /// The same sample on both channels.
    pub const fn mono(sample: i16) -> Self {
        StereoFrame {
            left: sample,
            right: sample,
        }
    }

    /// Pack into the hardware transfer word (left high, right low).
    #[inline(always)]
    pub fn to_word(self) -> u32 {
        pack_16b_16b(self.left as i32, self.right as i32)
    }

    /// Unpack a hardware transfer word.
    #[inline(always)]
    pub const fn from_word(word: u32) -> Self {
        StereoFrame {
            left: (word >> 16) as i16,
            right: word as i16,
        }
    }

    /// Average of both channels, used by mono backends.
    #[inline]
    pub fn to_mono(self) -> i16 {
        ((self.left as i32 + self.right as i32) >> 1) as i16
    }
}

impl From<StereoFrame> for u32 {
    #[inline(always)]
    fn from(frame: StereoFrame) -> u32 {
        frame.to_word()
    }
}
