//! Shared admission gate for outbound provider requests
//!
//! One [`Throttle`] is shared by every clone of a client (and may be shared
//! between clients). Admissions are serialized: a caller holds the gate for
//! the whole wait, so concurrent lookups are spaced at least one interval
//! apart. Every admission also waits at least one interval from the moment
//! the caller started its lookup.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Outcome of a cancelled wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted {
    /// How long the caller had been waiting when the signal arrived
    pub waited: Duration,
}

/// Process-wide rate gate in front of the provider
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_admission: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Create a gate with the given minimum interval
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_admission: Mutex::new(None),
        }
    }

    /// The configured minimum interval
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the caller may send, measured from `started`
    ///
    /// Returns the instant the caller was admitted. A cancelled wait leaves
    /// the gate untouched so the next caller does not inherit a slot.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] if `cancel` fires before admission.
    pub async fn admit(
        &self,
        started: Instant,
        cancel: &CancellationToken,
    ) -> Result<Instant, Interrupted> {
        let mut last = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Interrupted { waited: started.elapsed() }),
            guard = self.last_admission.lock() => guard,
        };

        let mut ready = started + self.interval;
        if let Some(previous) = *last {
            ready = ready.max(previous + self.interval);
        }

        let wait = ready.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            debug!(?wait, "Throttling geocoding request");
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Interrupted { waited: started.elapsed() }),
                () = tokio::time::sleep_until(ready) => {},
            }
        }

        let admitted = Instant::now();
        *last = Some(admitted);
        Ok(admitted)
    }
}
