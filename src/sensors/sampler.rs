//! Periodic sampler: measures a [`Bme280`] at a fixed interval and forwards
//! every outcome into a pre-allocated [`embassy_sync::Channel`].
//!
//! Measurement failures are forwarded as values, never fatal; the loop only
//! ends when the stop [`Signal`] fires, which is raced against the interval
//! timer so a stop request never waits for a full period.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel, signal::Signal};
use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use futures_util::{future::select, future::Either, pin_mut};

use crate::error::SensorError;
use crate::protocol::transport::traits::sample_timer::SampleTimer;
use crate::protocol::transport::traits::transport::Transport;
use crate::sensors::bme280::compensation::CompensatedReading;
use crate::sensors::bme280::Bme280;

/// One sampler output.
pub type SampleResult = Result<CompensatedReading, SensorError>;

/// Sampler timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Time between the end of one measurement and the start of the next.
    pub interval: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

/// Runner owning an initialised sensor.
pub struct SensorSampler<'a, T, D, S, const CAP: usize>
where
    T: Transport,
    D: DelayNs,
    S: SampleTimer,
{
    sensor: Bme280<T>,
    delay: D,
    timer: S,
    config: SamplerConfig,
    readings: &'a Channel<CriticalSectionRawMutex, SampleResult, CAP>,
    stop: &'a Signal<CriticalSectionRawMutex, ()>,
}

impl<'a, T, D, S, const CAP: usize> SensorSampler<'a, T, D, S, CAP>
where
    T: Transport,
    D: DelayNs,
    S: SampleTimer,
{
    /// `sensor` must already be initialised.
    pub fn new(
        sensor: Bme280<T>,
        delay: D,
        timer: S,
        config: SamplerConfig,
        readings: &'a Channel<CriticalSectionRawMutex, SampleResult, CAP>,
        stop: &'a Signal<CriticalSectionRawMutex, ()>,
    ) -> Self {
        Self {
            sensor,
            delay,
            timer,
            config,
            readings,
            stop,
        }
    }

    /// Sample until stopped, then hand the sensor back.
    pub async fn drive(mut self) -> Bme280<T> {
        let interval_ms = self.config.interval.as_millis().min(u32::MAX as u64) as u32;

        loop {
            let outcome = self.sensor.measure(&mut self.delay);
            if let Err(_err) = &outcome {
                #[cfg(feature = "defmt")]
                defmt::warn!("Measurement failed: {}", defmt::Debug2Format(_err));
            }
            self.readings.send(outcome).await;

            let stopped = {
                let tick = self.timer.delay_ms(interval_ms);
                let stop = self.stop.wait();
                pin_mut!(tick);
                pin_mut!(stop);

                matches!(select(tick, stop).await, Either::Right(_))
            };

            if stopped {
                #[cfg(feature = "defmt")]
                defmt::info!("Sensor sampler stopped");
                return self.sensor;
            }
        }
    }
}
