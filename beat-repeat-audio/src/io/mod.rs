//! Output path: ring buffer, frame sinks and sample layout conversion.
//!
//! ## Components
//!
//! | Item | Context | Description |
//! |------|---------|-------------|
//! | [`RingBuffer`] | producer: foreground, consumer: ISR | Lock-free SPSC frame queue |
//! | [`FrameSink`] | both | Start/stop/event interface of an output backend |
//! | [`DmaOutput`] | ISR | Ping-pong DMA driver, reference backend |
//! | [`PwmOutput`] | ISR | One frame per timer tick on a PWM pin (feature `pwm`) |
//! | [`NullOutput`] | any | Drains and discards, for boards without a DAC |
//!
//! ## Utilities
//!
//! - [`interleave`]: decoder sample layout to [`StereoFrame`](crate::frame::StereoFrame)
//!
//! ## DMA Buffer Layout
//!
//! The DMA driver streams two word buffers of [`DMA_BUFFER_FRAMES`] entries:
//! - Each `u32` = one stereo frame (left in the upper 16 bits, right in the lower 16)
//! - The hardware transfers one buffer while the ISR refills the other
//!
//! [`DMA_BUFFER_FRAMES`]: crate::constants::DMA_BUFFER_FRAMES

pub mod interleave;
pub mod ring_buffer;
pub mod sink;
pub mod dma_output;
pub mod null_output;

#[cfg(feature = "pwm")]
pub mod pwm_output;

pub use ring_buffer::RingBuffer;
pub use sink::{FrameSink, OutputStatus};
pub use dma_output::{DmaChannel, DmaDoubleBuffer, DmaOutput, OutputState};
pub use null_output::NullOutput;

#[cfg(feature = "pwm")]
pub use pwm_output::PwmOutput;
