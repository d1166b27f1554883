// src/core/admission.rs

use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Default admission rate for the bundled gate.
const DEFAULT_SCANS_PER_MINUTE: NonZeroU32 = nonzero!(10u32);

/// Token-bucket admission gate, consulted exactly once per scan request
/// before any provider is dispatched.
///
/// The gate only throttles whole scans; it has no influence on the internal
/// provider fan-out of an admitted scan. Callers that front the engine with
/// their own limiter can simply not install one.
pub struct AdmissionGate {
    limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl AdmissionGate {
    /// Gate allowing `per_minute` scans per minute.
    ///
    /// # Panics
    /// Panics if `per_minute` is 0; use `Option<AdmissionGate>` to disable
    /// admission control instead.
    pub fn per_minute(per_minute: u32) -> Self {
        let rate = NonZeroU32::new(per_minute).expect("admission rate must be > 0");
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(rate))),
        }
    }

    /// Gate with the default rate.
    pub fn with_defaults() -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(
                DEFAULT_SCANS_PER_MINUTE,
            ))),
        }
    }

    /// One admission check. Never waits: a closed gate rejects the scan.
    pub fn admit(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl Clone for AdmissionGate {
    fn clone(&self) -> Self {
        Self {
            limiter: Arc::clone(&self.limiter),
        }
    }
}
