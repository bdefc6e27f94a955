//! Output that drains the ring buffer without hardware.
//!
//! Useful on boards without a DAC and in tests: frames are consumed at the
//! same granularity as a DMA transfer and thrown away, so fill level and
//! underrun counters behave as they would on real hardware.

use core::convert::Infallible;

use crate::constants::DMA_BUFFER_FRAMES;
use crate::frame::StereoFrame;

use super::ring_buffer::RingBuffer;
use super::sink::{FrameSink, OutputStatus};

pub struct NullOutput<'a, const N: usize, const W: usize = DMA_BUFFER_FRAMES> {
    ring: &'a RingBuffer<N>,
    scratch: [StereoFrame; W],
    running: bool,
    frames_discarded: u64,
}

impl<'a, const N: usize, const W: usize> NullOutput<'a, N, W> {
    pub const fn new(ring: &'a RingBuffer<N>) -> Self {
        NullOutput {
            ring,
            scratch: [StereoFrame::SILENCE; W],
            running: false,
            frames_discarded: 0,
        }
    }

    /// Real frames pulled from the ring so far.
    pub fn frames_discarded(&self) -> u64 {
        self.frames_discarded
    }
}

impl<const N: usize, const W: usize> FrameSink for NullOutput<'_, N, W> {
    type Error = Infallible;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn on_hardware_event(&mut self) -> Result<(), Self::Error> {
        if self.running {
            let read = self.ring.consume_into(&mut self.scratch);
            self.frames_discarded += read as u64;
        }
        Ok(())
    }

    fn status(&self) -> OutputStatus {
        self.ring.status()
    }
}
