//! Double-buffered DMA output driver.
//!
//! [`DmaOutput`] drains the [`RingBuffer`] into two word buffers and keeps the
//! DMA channel alternating between them. On every transfer-complete event the
//! channel is re-armed with the other buffer first, then the buffer that just
//! finished is refilled while the hardware plays its twin.
//!
//! ## Architecture
//!
//! ```text
//! RingBuffer             DmaDoubleBuffer               serializer
//! ┌───────────┐        ┌──────────────────┐  DMA    ┌───────────┐
//! │ frames... ├─pack──►│ [0] W × u32      ├───or───►│  TX FIFO  │──► DAC
//! │           │        │ [1] W × u32      │         │           │
//! └───────────┘        └──────────────────┘         └───────────┘
//!                        ▲ refill the one not active
//! ```
//!
//! ## Buffer Layout
//!
//! - `[u32; W]` per buffer, one word per stereo frame
//! - Each word: left sample in bits 31–16, right sample in bits 15–0
//! - A buffer that cannot be filled from the ring is padded with silence
//!
//! ## Usage
//!
//! ```ignore
//! static RING: RingBuffer<RING_BUFFER_FRAMES> = RingBuffer::new();
//!
//! // In init: wrap the configured DMA channel
//! let mut output: DmaOutput<_, RING_BUFFER_FRAMES, DMA_BUFFER_FRAMES> =
//!     DmaOutput::new(&RING, channel);
//!
//! // In the DMA completion ISR:
//! output.on_transfer_complete();
//! ```

use core::convert::Infallible;

use crate::constants::DMA_BUFFER_FRAMES;

use super::ring_buffer::RingBuffer;
use super::sink::{FrameSink, OutputStatus};

/// Hardware channel that streams a word buffer to the serializer.
pub trait DmaChannel {
    /// Point the channel at `words` and start (or continue) transferring.
    ///
    /// The buffer stays untouched by software until the matching
    /// transfer-complete event.
    fn arm(&mut self, words: &[u32]);

    /// Abort any transfer in flight.
    fn halt(&mut self);
}

/// Whether the driver is currently feeding the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputState {
    Stopped,
    Running,
}

/// Two equally sized word buffers and the index of the one in flight.
pub struct DmaDoubleBuffer<const W: usize> {
    buffers: [[u32; W]; 2],
    active_index: usize,
}

impl<const W: usize> DmaDoubleBuffer<W> {
    pub const fn new() -> Self {
        assert!(W >= 1, "DMA buffer must hold at least one word");

        DmaDoubleBuffer {
            buffers: [[0; W]; 2],
            active_index: 0,
        }
    }

    /// Index (0 or 1) of the buffer owned by the hardware.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn buffer(&self, index: usize) -> &[u32; W] {
        &self.buffers[index & 1]
    }

    fn fill_from<const N: usize>(&mut self, index: usize, ring: &RingBuffer<N>) {
        ring.consume_into(&mut self.buffers[index & 1]);
    }
}

impl<const W: usize> Default for DmaDoubleBuffer<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ping-pong DMA output stage draining a [`RingBuffer`] of `N` frames in
/// transfers of `W` frames.
pub struct DmaOutput<'a, C: DmaChannel, const N: usize, const W: usize = DMA_BUFFER_FRAMES> {
    ring: &'a RingBuffer<N>,
    channel: C,
    buffers: DmaDoubleBuffer<W>,
    state: OutputState,
    transfers_completed: u32,
}

impl<'a, C: DmaChannel, const N: usize, const W: usize> DmaOutput<'a, C, N, W> {
    /// Create a stopped driver. The channel is not touched until
    /// [`start()`](Self::start).
    pub const fn new(ring: &'a RingBuffer<N>, channel: C) -> Self {
        DmaOutput {
            ring,
            channel,
            buffers: DmaDoubleBuffer::new(),
            state: OutputState::Stopped,
            transfers_completed: 0,
        }
    }

    /// Pre-fill both buffers and arm buffer 0. Does nothing if running.
    ///
    /// The channel keeps pointing into `self` until [`stop()`](Self::stop):
    /// the driver must not move while running (keep it in a `static` or a
    /// task-local resource).
    pub fn start(&mut self) {
        if self.state == OutputState::Running {
            return;
        }

        self.buffers.fill_from(0, self.ring);
        self.buffers.fill_from(1, self.ring);
        self.buffers.active_index = 0;
        self.channel.arm(&self.buffers.buffers[0]);
        self.state = OutputState::Running;
    }

    /// Halt the channel. Buffer contents are left as they are.
    pub fn stop(&mut self) {
        if self.state == OutputState::Stopped {
            return;
        }

        self.channel.halt();
        self.state = OutputState::Stopped;
    }

    /// Handle the DMA transfer-complete interrupt.
    ///
    /// Arms the other buffer before refilling the finished one, so the
    /// hardware never waits on the refill. Ignored while stopped.
    pub fn on_transfer_complete(&mut self) {
        if self.state != OutputState::Running {
            return;
        }

        let finished = self.buffers.active_index;
        let next = finished ^ 1;
        self.buffers.active_index = next;
        self.channel.arm(&self.buffers.buffers[next]);

        self.buffers.fill_from(finished, self.ring);
        self.transfers_completed = self.transfers_completed.wrapping_add(1);
    }

    pub fn state(&self) -> OutputState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == OutputState::Running
    }

    /// Index (0 or 1) of the buffer the hardware is transferring.
    pub fn active_index(&self) -> usize {
        self.buffers.active_index()
    }

    pub fn buffer(&self, index: usize) -> &[u32; W] {
        self.buffers.buffer(index)
    }

    /// Completed transfers since construction (wrapping).
    pub fn transfers_completed(&self) -> u32 {
        self.transfers_completed
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn status(&self) -> OutputStatus {
        self.ring.status()
    }
}

impl<C: DmaChannel, const N: usize, const W: usize> FrameSink for DmaOutput<'_, C, N, W> {
    type Error = Infallible;

    fn start(&mut self) -> Result<(), Self::Error> {
        DmaOutput::start(self);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        DmaOutput::stop(self);
        Ok(())
    }

    fn is_running(&self) -> bool {
        DmaOutput::is_running(self)
    }

    fn on_hardware_event(&mut self) -> Result<(), Self::Error> {
        self.on_transfer_complete();
        Ok(())
    }

    fn status(&self) -> OutputStatus {
        DmaOutput::status(self)
    }
}
