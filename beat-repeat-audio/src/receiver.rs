//! Decoder-facing glue: the PCM callback and the foreground control loop.
//!
//! ```text
//!  decoder ──on_pcm_block──► Receiver ──write──► RingBuffer ──► FrameSink (ISR)
//!                              │  ▲
//!   main loop ──poll(connected)┘  └─ BeatRepeat (in place)
//! ```
//!
//! [`Receiver`] owns the effect and the producer side of the ring buffer.
//! The main loop calls [`poll`](Receiver::poll) on every iteration; it tracks
//! the stream connection, starts the sink once enough audio is buffered, and
//! emits a periodic status line.

use crate::constants::{MAX_SLICE_FRAMES, RING_BUFFER_FRAMES, STATUS_LOG_INTERVAL_MS};
use crate::effect::BeatRepeat;
use crate::frame::StereoFrame;
use crate::io::interleave::{available_frames, deinterleave_frames};
use crate::io::{FrameSink, OutputStatus, RingBuffer};

/// Frames converted per ring buffer write. Bounds the stack used by
/// [`Receiver::on_pcm_block`].
const WRITE_CHUNK_FRAMES: usize = 64;

/// Decoded PCM blocks are logged in summary every this many blocks.
const STATS_LOG_INTERVAL_BLOCKS: u32 = 100;

/// Receives decoded PCM from the Bluetooth stack.
///
/// `samples` is interleaved, `frame_count` frames of `channels` samples each,
/// and may be modified in place.
pub trait PcmHandler {
    fn on_pcm_block(&mut self, samples: &mut [i16], frame_count: u32, channels: u8, sample_rate: u32);
}

impl<F> PcmHandler for F
where
    F: FnMut(&mut [i16], u32, u8, u32),
{
    fn on_pcm_block(&mut self, samples: &mut [i16], frame_count: u32, channels: u8, sample_rate: u32) {
        self(samples, frame_count, channels, sample_rate)
    }
}

/// Counters for decoded audio arriving at the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PcmStats {
    /// PCM callbacks seen.
    pub blocks: u32,
    /// Frames handed over by the decoder.
    pub frames_received: u64,
    /// Frames lost because the ring buffer was full.
    pub frames_dropped: u64,
}

/// Fill level classification used by the periodic status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferLevel {
    /// Below a quarter of capacity.
    Low,
    Normal,
    /// Above three quarters of capacity.
    High,
}

impl BufferLevel {
    pub fn classify(filled: usize, capacity: usize) -> Self {
        if filled < capacity / 4 {
            BufferLevel::Low
        } else if filled > capacity * 3 / 4 {
            BufferLevel::High
        } else {
            BufferLevel::Normal
        }
    }
}

/// Foreground audio pipeline: effect, ring buffer producer and output
/// start/stop policy.
pub struct Receiver<'a, const N: usize, const S: usize> {
    ring: &'a RingBuffer<N>,
    effect: BeatRepeat<S>,
    stats: PcmStats,
    sample_rate: u32,
    connected: bool,
    start_threshold: usize,
    last_status_ms: u32,
}

/// Receiver with a one-second ring buffer and a one-second capture buffer.
pub type DefaultReceiver<'a> = Receiver<'a, RING_BUFFER_FRAMES, MAX_SLICE_FRAMES>;

impl<'a, const N: usize, const S: usize> Receiver<'a, N, S> {
    /// Create a receiver feeding `ring`, expecting audio at `sample_rate`.
    ///
    /// The output is started once an eighth of the ring is filled.
    pub const fn new(ring: &'a RingBuffer<N>, sample_rate: u32) -> Self {
        let threshold = N / 8;
        Receiver {
            ring,
            effect: BeatRepeat::new(sample_rate),
            stats: PcmStats {
                blocks: 0,
                frames_received: 0,
                frames_dropped: 0,
            },
            sample_rate,
            connected: false,
            start_threshold: if threshold == 0 { 1 } else { threshold },
            last_status_ms: 0,
        }
    }

    /// Override the fill level that starts the output, clamped to `1..=N`.
    pub const fn with_start_threshold(mut self, frames: usize) -> Self {
        self.start_threshold = if frames == 0 {
            1
        } else if frames > N {
            N
        } else {
            frames
        };
        self
    }

    pub fn effect(&self) -> &BeatRepeat<S> {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut BeatRepeat<S> {
        &mut self.effect
    }

    pub fn stats(&self) -> PcmStats {
        self.stats
    }

    /// Sample rate of the most recent PCM block.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn start_threshold(&self) -> usize {
        self.start_threshold
    }

    /// Run one iteration of the foreground control loop.
    ///
    /// - On a connected → disconnected edge the sink is stopped, the ring
    ///   buffer cleared and the effect reset.
    /// - While connected, a stopped sink is started once the ring holds at
    ///   least [`start_threshold`](Self::start_threshold) frames.
    /// - While connected, a status line is logged every
    ///   [`STATUS_LOG_INTERVAL_MS`].
    pub fn poll<K: FrameSink>(&mut self, connected: bool, now_ms: u32, sink: &mut K) -> Result<(), K::Error> {
        if connected != self.connected {
            if connected {
                #[cfg(feature = "defmt")]
                defmt::info!("audio stream connected");
                self.last_status_ms = now_ms;
            } else {
                #[cfg(feature = "defmt")]
                defmt::info!("audio stream disconnected");
                // A failed stop leaves the edge pending for the next poll.
                sink.stop()?;
                self.ring.clear();
                self.effect.reset();
            }
            self.connected = connected;
        }

        if !self.connected {
            return Ok(());
        }

        if !sink.is_running() && self.ring.filled_count() >= self.start_threshold {
            #[cfg(feature = "defmt")]
            defmt::info!("starting output, {} frames buffered", self.ring.filled_count());
            sink.start()?;
        }

        if now_ms.wrapping_sub(self.last_status_ms) >= STATUS_LOG_INTERVAL_MS {
            self.last_status_ms = now_ms;
            log_status(sink.status(), N);
        }
        Ok(())
    }

    fn write_frames(&mut self, samples: &[i16], frames: usize, channels: u8) -> usize {
        let mut chunk = [StereoFrame::SILENCE; WRITE_CHUNK_FRAMES];
        let mut dropped = 0;
        let mut done = 0;

        while done < frames {
            let n = (frames - done).min(WRITE_CHUNK_FRAMES);
            deinterleave_frames(&mut chunk[..n], samples, done, channels);
            dropped += n - self.ring.write(&chunk[..n]);
            done += n;
        }
        dropped
    }
}

impl<const N: usize, const S: usize> PcmHandler for Receiver<'_, N, S> {
    fn on_pcm_block(&mut self, samples: &mut [i16], frame_count: u32, channels: u8, sample_rate: u32) {
        if sample_rate != self.sample_rate {
            #[cfg(feature = "defmt")]
            defmt::info!("sample rate changed: {} -> {} Hz", self.sample_rate, sample_rate);
            self.sample_rate = sample_rate;
        }

        let frames = available_frames(samples, frame_count as usize, channels);
        self.effect.process(samples, frames, channels);
        let dropped = self.write_frames(samples, frames, channels);

        self.stats.blocks = self.stats.blocks.wrapping_add(1);
        self.stats.frames_received += frames as u64;

        if dropped > 0 {
            self.stats.frames_dropped += dropped as u64;
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "ring buffer full, dropped {} frames (total {})",
                dropped,
                self.stats.frames_dropped
            );
        }

        if self.stats.blocks % STATS_LOG_INTERVAL_BLOCKS == 0 {
            #[cfg(feature = "defmt")]
            defmt::info!(
                "pcm: {} blocks, {} frames, {} dropped",
                self.stats.blocks,
                self.stats.frames_received,
                self.stats.frames_dropped
            );
        }
    }
}

#[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
fn log_status(status: OutputStatus, capacity: usize) {
    #[cfg(feature = "defmt")]
    {
        defmt::info!(
            "buffer {}/{} frames | free {} | underruns {} | overruns {}",
            status.buffered_frames,
            capacity,
            status.free_space,
            status.underruns,
            status.overruns
        );
        match BufferLevel::classify(status.buffered_frames, capacity) {
            BufferLevel::Low => defmt::warn!("buffer level low"),
            BufferLevel::High => defmt::warn!("buffer level high"),
            BufferLevel::Normal => {}
        }
    }
}
