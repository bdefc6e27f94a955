//! Single-pin PWM output.
//!
//! A low-cost alternative to the DMA serializer: a sample timer interrupt
//! calls [`PwmOutput::on_tick`] once per frame, the frame is folded to mono
//! and written as a duty cycle. An RC filter on the pin does the rest.
//!
//! Signed samples map linearly onto `0..=max_duty`, so digital silence is the
//! midpoint duty.

use embedded_hal::pwm::SetDutyCycle;

use super::ring_buffer::RingBuffer;
use super::sink::{FrameSink, OutputStatus};

/// Map a signed sample onto `0..=max_duty`.
#[inline]
pub fn sample_to_duty(sample: i16, max_duty: u16) -> u16 {
    let offset = (sample as i32 + 32_768) as u32;
    ((offset * (max_duty as u32 + 1)) >> 16) as u16
}

/// Duty cycle that represents silence.
#[inline]
pub fn midpoint_duty(max_duty: u16) -> u16 {
    sample_to_duty(0, max_duty)
}

/// PWM backend draining one frame per sample tick.
pub struct PwmOutput<'a, P: SetDutyCycle, const N: usize> {
    ring: &'a RingBuffer<N>,
    pwm: P,
    running: bool,
}

impl<'a, P: SetDutyCycle, const N: usize> PwmOutput<'a, P, N> {
    pub fn new(ring: &'a RingBuffer<N>, pwm: P) -> Self {
        PwmOutput {
            ring,
            pwm,
            running: false,
        }
    }

    fn silence(&mut self) -> Result<(), P::Error> {
        let mid = midpoint_duty(self.pwm.max_duty_cycle());
        self.pwm.set_duty_cycle(mid)
    }

    /// Output the next frame. An empty ring plays silence and counts one
    /// underrun. Ignored while stopped.
    pub fn on_tick(&mut self) -> Result<(), P::Error> {
        if !self.running {
            return Ok(());
        }

        match self.ring.pop() {
            Some(frame) => {
                let duty = sample_to_duty(frame.to_mono(), self.pwm.max_duty_cycle());
                self.pwm.set_duty_cycle(duty)
            }
            None => {
                self.ring.note_underrun();
                self.silence()
            }
        }
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Give the PWM channel back.
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle, const N: usize> FrameSink for PwmOutput<'_, P, N> {
    type Error = P::Error;

    fn start(&mut self) -> Result<(), Self::Error> {
        if self.running {
            return Ok(());
        }
        self.silence()?;
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        if !self.running {
            return Ok(());
        }
        self.running = false;
        self.silence()
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn on_hardware_event(&mut self) -> Result<(), Self::Error> {
        self.on_tick()
    }

    fn status(&self) -> OutputStatus {
        self.ring.status()
    }
}
