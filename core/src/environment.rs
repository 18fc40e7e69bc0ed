//! Dependency injection traits.
//!
//! All external dependencies a reducer touches are abstracted behind traits
//! and injected via the Environment parameter. Nothing in this product holds
//! an ambient global handle; the platform client, mailer, gateway, and clock
//! all arrive through an environment constructed in `main` (or in a test).

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use wayfare_core::environment::Clock;
///
/// // Test clock - fixed time for deterministic tests
/// struct FixedClock {
///     time: DateTime<Utc>,
/// }
///
/// impl Clock for FixedClock {
///     fn now(&self) -> DateTime<Utc> {
///         self.time
///     }
/// }
///
/// let clock = FixedClock {
///     time: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap(),
/// };
/// assert_eq!(clock.now().timestamp(), 1748779200);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
