//! Process-wide monotonic UTC timestamps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

static LAST_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current UTC time at microsecond precision, never earlier than any value
/// previously returned in this process.
pub fn monotonic_now() -> DateTime<Utc> {
    let now = Utc::now();
    let micros = now.timestamp_micros();
    let previous = LAST_MICROS.fetch_max(micros, Ordering::SeqCst);
    DateTime::from_timestamp_micros(previous.max(micros)).unwrap_or(now)
}
