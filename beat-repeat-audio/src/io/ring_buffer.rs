//! Lock-free single-producer single-consumer ring buffer of stereo frames.
//!
//! Sits between the foreground decode path and the output interrupt. Both
//! sides only ever touch their own index; the shared fill count is updated
//! with atomic read-modify-write operations and publishes the frame data.
//!
//! # Safety Contract
//!
//! - Only ONE context may call [`write()`](RingBuffer::write) (the "producer").
//! - Only ONE context may call [`consume_into()`](RingBuffer::consume_into) or
//!   [`pop()`](RingBuffer::pop) (the "consumer").
//! - [`clear()`](RingBuffer::clear) runs on the producer side while the
//!   consumer is halted.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::frame::StereoFrame;

use super::sink::OutputStatus;

/// Fixed-capacity FIFO of `N` stereo frames.
///
/// Unlike a Lamport queue no slot is sacrificed: the fill count tells a full
/// buffer from an empty one, so all `N` slots are usable.
pub struct RingBuffer<const N: usize> {
    storage: UnsafeCell<[StereoFrame; N]>,
    /// Next slot to write (only modified by the producer).
    write_index: AtomicUsize,
    /// Oldest unread slot (only modified by the consumer).
    read_index: AtomicUsize,
    /// Frames written and not yet consumed, `0..=N`.
    filled: AtomicUsize,
    underruns: AtomicU32,
    overruns: AtomicU32,
}

// SAFETY: Producer and consumer never access the same slot concurrently. A
// slot is handed from producer to consumer by the Release increment of
// `filled` and back by the Release decrement; both sides Acquire-load
// `filled` before touching slots.
unsafe impl<const N: usize> Sync for RingBuffer<N> {}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty, zero-filled buffer.
    ///
    /// # Panics
    ///
    /// Compile-time assertion: `N` must be at least 1.
    pub const fn new() -> Self {
        assert!(N >= 1, "ring buffer must have at least one slot");

        RingBuffer {
            storage: UnsafeCell::new([StereoFrame::SILENCE; N]),
            write_index: AtomicUsize::new(0),
            read_index: AtomicUsize::new(0),
            filled: AtomicUsize::new(0),
            underruns: AtomicU32::new(0),
            overruns: AtomicU32::new(0),
        }
    }

    #[inline(always)]
    fn slot(&self, index: usize) -> *mut StereoFrame {
        debug_assert!(index < N);
        // SAFETY: index < N keeps the pointer inside the array.
        unsafe { (self.storage.get() as *mut StereoFrame).add(index) }
    }

    #[inline(always)]
    const fn advance(index: usize) -> usize {
        if index + 1 == N {
            0
        } else {
            index + 1
        }
    }

    /// Append `frames` (producer side).
    ///
    /// Copies as many frames as fit and returns that count. Frames that do not
    /// fit are dropped and added to the overrun counter; existing contents are
    /// never overwritten.
    pub fn write(&self, frames: &[StereoFrame]) -> usize {
        let free = N - self.filled.load(Ordering::Acquire);
        let count = frames.len().min(free);

        let dropped = frames.len() - count;
        if dropped > 0 {
            self.overruns.fetch_add(dropped as u32, Ordering::Relaxed);
        }
        if count == 0 {
            return 0;
        }

        let mut index = self.write_index.load(Ordering::Relaxed);
        for &frame in &frames[..count] {
            // SAFETY: We are the sole producer and `count <= free`, so none of
            // these slots hold unread frames the consumer may be reading.
            unsafe { self.slot(index).write(frame) };
            index = Self::advance(index);
        }
        self.write_index.store(index, Ordering::Relaxed);

        // Release publishes the slot writes to the consumer.
        self.filled.fetch_add(count, Ordering::Release);
        count
    }

    /// Fill all of `dest` (consumer side).
    ///
    /// Buffered frames come first, oldest first. If the buffer runs dry the
    /// remainder is silence and each silent slot counts as one underrun.
    /// Returns the number of real frames copied.
    pub fn consume_into<T: From<StereoFrame>>(&self, dest: &mut [T]) -> usize {
        let available = self.filled.load(Ordering::Acquire);
        let count = dest.len().min(available);

        if count > 0 {
            let mut index = self.read_index.load(Ordering::Relaxed);
            for out in &mut dest[..count] {
                // SAFETY: We are the sole consumer and the Acquire load of
                // `filled` made these `count` slots' contents visible.
                *out = T::from(unsafe { self.slot(index).read() });
                index = Self::advance(index);
            }
            self.read_index.store(index, Ordering::Relaxed);
            // Release hands the slots back to the producer.
            self.filled.fetch_sub(count, Ordering::Release);
        }

        let missing = dest.len() - count;
        if missing > 0 {
            for out in &mut dest[count..] {
                *out = T::from(StereoFrame::SILENCE);
            }
            self.underruns.fetch_add(missing as u32, Ordering::Relaxed);
        }
        count
    }

    /// Take the oldest frame (consumer side). Does not count underruns.
    pub fn pop(&self) -> Option<StereoFrame> {
        if self.filled.load(Ordering::Acquire) == 0 {
            return None;
        }

        let index = self.read_index.load(Ordering::Relaxed);
        // SAFETY: sole consumer, `filled > 0` guarantees this slot is written.
        let frame = unsafe { self.slot(index).read() };
        self.read_index.store(Self::advance(index), Ordering::Relaxed);
        self.filled.fetch_sub(1, Ordering::Release);
        Some(frame)
    }

    /// Record one underrun on behalf of a consumer that produced silence
    /// without calling [`consume_into`](Self::consume_into).
    pub fn note_underrun(&self) {
        self.underruns.fetch_add(1, Ordering::Relaxed);
    }

    /// Discard everything and reset the counters.
    ///
    /// The consumer must be halted while this runs.
    pub fn clear(&self) {
        for index in 0..N {
            // SAFETY: with the consumer halted no other reference to the
            // storage is live.
            unsafe { self.slot(index).write(StereoFrame::SILENCE) };
        }
        self.write_index.store(0, Ordering::Relaxed);
        self.read_index.store(0, Ordering::Relaxed);
        self.underruns.store(0, Ordering::Relaxed);
        self.overruns.store(0, Ordering::Relaxed);
        self.filled.store(0, Ordering::Release);
    }

    pub fn filled_count(&self) -> usize {
        self.filled.load(Ordering::Acquire)
    }

    pub fn free_space(&self) -> usize {
        N - self.filled_count()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn underrun_count(&self) -> u32 {
        self.underruns.load(Ordering::Relaxed)
    }

    pub fn overrun_count(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }

    /// Snapshot of fill level and error counters.
    pub fn status(&self) -> OutputStatus {
        let buffered_frames = self.filled_count();
        OutputStatus {
            buffered_frames,
            free_space: N - buffered_frames,
            underruns: self.underrun_count(),
            overruns: self.overrun_count(),
        }
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
