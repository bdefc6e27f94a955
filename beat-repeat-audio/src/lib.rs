//! # beat-repeat-audio
//!
//! A `no_std`, zero-allocation audio path for a Bluetooth A2DP receiver on a
//! Cortex-M microcontroller. Decoded PCM from the Bluetooth stack runs through
//! a real-time beat-repeat effect, is queued in a lock-free ring buffer and is
//! streamed to a DAC by an interrupt-driven, double-buffered DMA output.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Types | [`frame`] / [`constants`] | `StereoFrame`, hardware word layout, configuration |
//! | DSP | [`dsp`] | Saturation, dry/wet mix, interpolation, window gain |
//! | Effect | [`effect`] | Beat-repeat engine, parameters, gate generator |
//! | I/O | [`io`] | SPSC ring buffer, `FrameSink` backends (DMA, PWM, null) |
//! | Glue | [`receiver`] | PCM callback, auto-start, connection handling |
//!
//! ## Quick start
//!
//! ```ignore
//! use beat_repeat_audio::io::{DmaOutput, RingBuffer};
//! use beat_repeat_audio::receiver::{DefaultReceiver, PcmHandler};
//!
//! static RING: RingBuffer<RING_BUFFER_FRAMES> = RingBuffer::new();
//!
//! let mut rx = DefaultReceiver::new(&RING, AUDIO_SAMPLE_RATE);
//! let mut out: DmaOutput<_, RING_BUFFER_FRAMES> = DmaOutput::new(&RING, dma_channel);
//!
//! // Bluetooth stack callback:
//! rx.on_pcm_block(samples, frame_count, channels, sample_rate);
//!
//! // DMA transfer-complete ISR:
//! out.on_transfer_complete();
//!
//! // Main loop:
//! rx.poll(bt.is_connected(), now_ms(), &mut out)?;
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `pwm` | yes | PWM output backend (requires `embedded-hal`) |
//! | `defmt` | no | Structured logging and `defmt::Format` on public types |
//!
//! ## Audio parameters
//!
//! - **Sample rate:** 44 100 Hz ([`constants::AUDIO_SAMPLE_RATE`])
//! - **Sample format:** `i16` stereo, one `u32` word per frame on the wire
//! - **Ring buffer:** one second ([`constants::RING_BUFFER_FRAMES`])
//! - **DMA transfer:** 512 frames ([`constants::DMA_BUFFER_FRAMES`])

#![no_std]

pub mod constants;
pub mod frame;
pub mod dsp;
pub mod effect;
pub mod io;
pub mod receiver;

pub use frame::StereoFrame;
