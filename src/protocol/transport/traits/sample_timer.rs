//! Asynchronous timer pacing the periodic sensor sampler.

/// Source of sampling delays (embassy `Timer`, tokio `sleep`, test double).
pub trait SampleTimer {
    /// Resolve after `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}
