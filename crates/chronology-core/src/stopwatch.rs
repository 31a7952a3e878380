//! # Stopwatch
//!
//! Wall-clock timer for one classification run.
//!
//! Starts at construction. The first `stop()` fixes the end instant; later
//! calls are no-ops, so repeated reports show the same duration.
//!
//! All averaging and formatting is integer nanosecond arithmetic.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const SECS_PER_MIN: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;

/// Run timer, shareable across threads.
#[derive(Debug)]
pub struct Stopwatch {
    start: Instant,
    end: OnceLock<Instant>,
}

impl Stopwatch {
    /// Start a new stopwatch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            end: OnceLock::new(),
        }
    }

    /// Stop the stopwatch and return the elapsed time.
    ///
    /// Idempotent: only the first call records the end instant.
    pub fn stop(&self) -> Duration {
        let end = self.end.get_or_init(Instant::now);
        end.saturating_duration_since(self.start)
    }

    /// Whether `stop()` has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.end.get().is_some()
    }

    /// Elapsed time between start and stop, `None` while running.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.end
            .get()
            .map(|end| end.saturating_duration_since(self.start))
    }

    /// Elapsed time divided by `items`.
    ///
    /// Zero when `items == 0` or the stopwatch is still running.
    #[must_use]
    pub fn average_per_item(&self, items: u64) -> Duration {
        self.elapsed()
            .map(|elapsed| average(elapsed, items))
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// `total / items`, zero for zero items.
#[must_use]
pub fn average(total: Duration, items: u64) -> Duration {
    if items == 0 {
        return Duration::ZERO;
    }
    let nanos = total.as_nanos() / u128::from(items);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Human-readable duration with three fractional digits.
///
/// Picks the largest unit that keeps the whole part non-zero:
/// `850 ns`, `12.345 µs`, `3.200 ms`, `4.017 s`, `2 min 05.250 s`,
/// `1 h 02 min 03.000 s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < NANOS_PER_MICRO {
        return format!("{} ns", nanos);
    }
    if nanos < NANOS_PER_MILLI {
        return format!(
            "{}.{:03} µs",
            nanos / NANOS_PER_MICRO,
            nanos % NANOS_PER_MICRO
        );
    }
    if nanos < NANOS_PER_SEC {
        return format!(
            "{}.{:03} ms",
            nanos / NANOS_PER_MILLI,
            (nanos % NANOS_PER_MILLI) / NANOS_PER_MICRO
        );
    }

    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    if secs < SECS_PER_MIN {
        return format!("{}.{:03} s", secs, millis);
    }

    let hours = secs / SECS_PER_HOUR;
    let mins = (secs % SECS_PER_HOUR) / SECS_PER_MIN;
    let rem = secs % SECS_PER_MIN;
    if hours == 0 {
        format!("{} min {:02}.{:03} s", mins, rem, millis)
    } else {
        format!("{} h {:02} min {:02}.{:03} s", hours, mins, rem, millis)
    }
}

// =============================================================================
// TESTS
// =============================================================================
