/// Snapshot of the output path for monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputStatus {
    /// Frames waiting in the ring buffer.
    pub buffered_frames: usize,
    /// Frames that can still be written without overrun.
    pub free_space: usize,
    /// Silent frames emitted because the ring buffer ran dry.
    pub underruns: u32,
    /// Frames dropped because the ring buffer was full.
    pub overruns: u32,
}

/// Trait for hardware output backends that drain the ring buffer.
///
/// One implementation per transport (DMA serializer, PWM, ...). The
/// foreground loop starts and stops the sink; the backend's interrupt
/// handler forwards hardware events to [`on_hardware_event`](Self::on_hardware_event).
pub trait FrameSink {
    /// Error type for backend operations.
    type Error;

    /// Begin draining the ring buffer. Does nothing if already running.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Halt the hardware. Does nothing if already stopped.
    fn stop(&mut self) -> Result<(), Self::Error>;

    fn is_running(&self) -> bool;

    /// Service one hardware event (transfer complete, sample tick).
    ///
    /// Runs in interrupt context: must not block or log.
    fn on_hardware_event(&mut self) -> Result<(), Self::Error>;

    /// Fill level and error counters of the ring buffer behind this sink.
    fn status(&self) -> OutputStatus;
}
