//! Time-ordered 64-bit ids.
//!
//! Bit layout, high to low: 41 bits of milliseconds since [`Snowflake::EPOCH`]
//! (the sign bit stays clear), 10 bits of worker id, 12 bits of per-millisecond
//! sequence. Sorting by raw value therefore sorts by creation time, which is
//! what the keyset pagination cursors rely on.
//!
//! Ids are unique across all entity types, which is what allows an engagement
//! target to be addressed by bare id and resolved to either a problem or a
//! comment.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const TIMESTAMP_SHIFT: u32 = 22;
const WORKER_SHIFT: u32 = 12;
const WORKER_MASK: i64 = 0x3FF;
const SEQUENCE_MASK: i64 = 0xFFF;
const MAX_WORKER_ID: u16 = 1023;

/// 64-bit snowflake ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2024-01-01 00:00:00 UTC, in milliseconds.
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Pack the three fields into an id. `timestamp_ms` counts from the Unix
    /// epoch; callers keep `worker_id` and `sequence` inside their bit widths.
    #[inline]
    pub const fn from_parts(timestamp_ms: i64, worker_id: u16, sequence: u16) -> Self {
        Self(
            ((timestamp_ms - Self::EPOCH) << TIMESTAMP_SHIFT)
                | ((worker_id as i64) << WORKER_SHIFT)
                | sequence as i64,
        )
    }

    /// The raw i64, for database binds.
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Creation time in milliseconds since the Unix epoch.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> WORKER_SHIFT) & WORKER_MASK) as u16
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

/// Error when parsing a Snowflake from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

// Serialized as a string in JSON: 64-bit ids overflow JavaScript numbers
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Accepted back as either a string or an integer
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a snowflake id as a string or integer")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                Ok(Snowflake(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                self.visit_i64(value as i64)
            }

            fn visit_str<E>(self, value: &str) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                value
                    .parse::<i64>()
                    .map(Snowflake)
                    .map_err(|_| de::Error::custom("invalid snowflake string"))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Thread-safe snowflake generator
///
/// Lock-free; yields up to 4096 ids per millisecond per worker.
pub struct SnowflakeGenerator {
    worker_id: u16,
    sequence: AtomicI64,
    last_timestamp: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator for one worker.
    ///
    /// # Panics
    /// Panics when `worker_id` does not fit in 10 bits.
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "worker id out of range (0-1023)");
        Self {
            worker_id,
            sequence: AtomicI64::new(0),
            last_timestamp: AtomicI64::new(0),
        }
    }

    /// Generate the next unique Snowflake
    pub fn generate(&self) -> Snowflake {
        loop {
            let mut now = now_millis();
            let last = self.last_timestamp.load(Ordering::Acquire);

            if now < last {
                // Clock stepped backwards; wait until it catches up.
                std::thread::sleep(std::time::Duration::from_millis((last - now) as u64));
                now = now_millis();
            }

            let sequence = if now == last {
                let seq = self.sequence.fetch_add(1, Ordering::Relaxed) & SEQUENCE_MASK;
                if seq == 0 {
                    // 4096 ids in one millisecond; spin into the next one.
                    while now_millis() <= last {
                        std::hint::spin_loop();
                    }
                    now = now_millis();
                    self.sequence.store(1, Ordering::Relaxed);
                    0
                } else {
                    seq
                }
            } else {
                self.sequence.store(1, Ordering::Relaxed);
                0
            };

            let claimed = self
                .last_timestamp
                .compare_exchange(last, now, Ordering::Release, Ordering::Relaxed)
                .is_ok();
            if claimed {
                return Snowflake::from_parts(now, self.worker_id, sequence as u16);
            }
            // Another thread advanced the timestamp first; retry.
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
