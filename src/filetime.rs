//! FILETIME timestamps as used in SMB2 messages.
//!
//! A FILETIME counts 100-nanosecond ticks since 1601-01-01 00:00 UTC.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Ticks between the FILETIME epoch (1601) and the Unix epoch (1970).
const UNIX_EPOCH_TICKS: u64 = 116_444_736_000_000_000;

/// Ticks per second (one tick is 100 ns).
const TICKS_PER_SECOND: u64 = 10_000_000;

/// A 64-bit tick timestamp with 100-nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FileTime(u64);

impl FileTime {
    /// The zero timestamp. Servers send it for ServerStartTime to mean
    /// "not available".
    pub const ZERO: FileTime = FileTime(0);

    pub const fn from_ticks(ticks: u64) -> Self {
        FileTime(ticks)
    }

    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Convert from a `SystemTime`, saturating at the representable range.
    /// Sub-tick precision (below 100 ns) is discarded.
    pub fn from_system_time(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => {
                let ticks = d
                    .as_secs()
                    .saturating_mul(TICKS_PER_SECOND)
                    .saturating_add(u64::from(d.subsec_nanos()) / 100);
                FileTime(UNIX_EPOCH_TICKS.saturating_add(ticks))
            }
            Err(e) => {
                let d = e.duration();
                let ticks = d
                    .as_secs()
                    .saturating_mul(TICKS_PER_SECOND)
                    .saturating_add(u64::from(d.subsec_nanos()).div_ceil(100));
                FileTime(UNIX_EPOCH_TICKS.saturating_sub(ticks))
            }
        }
    }

    /// Convert to a `SystemTime`. Times before 1970 land before `UNIX_EPOCH`.
    pub fn to_system_time(self) -> SystemTime {
        if self.0 >= UNIX_EPOCH_TICKS {
            UNIX_EPOCH + tick_duration(self.0 - UNIX_EPOCH_TICKS)
        } else {
            UNIX_EPOCH - tick_duration(UNIX_EPOCH_TICKS - self.0)
        }
    }
}

fn tick_duration(ticks: u64) -> Duration {
    let secs = ticks / TICKS_PER_SECOND;
    let nanos = (ticks % TICKS_PER_SECOND) as u32 * 100;
    Duration::new(secs, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(FileTime::ZERO.ticks(), 0);
        assert_eq!(FileTime::default(), FileTime::ZERO);
    }

    #[test]
    fn test_unix_epoch() {
        assert_eq!(FileTime::from_system_time(UNIX_EPOCH).ticks(), UNIX_EPOCH_TICKS);
        assert_eq!(FileTime::from_ticks(UNIX_EPOCH_TICKS).to_system_time(), UNIX_EPOCH);
    }

    #[test]
    fn test_roundtrip_through_system_time() {
        // 2021-01-01 00:00:00 UTC
        let ft = FileTime::from_ticks(132_539_328_000_000_000);
        assert_eq!(FileTime::from_system_time(ft.to_system_time()), ft);
    }

    #[test]
    fn test_before_unix_epoch() {
        let ft = FileTime::from_ticks(0);
        let t = ft.to_system_time();
        assert!(t < UNIX_EPOCH);
        assert_eq!(FileTime::from_system_time(t), ft);
    }

    #[test]
    fn test_now_is_after_unix_epoch() {
        assert!(FileTime::now().ticks() > UNIX_EPOCH_TICKS);
    }

    #[test]
    fn test_sub_tick_precision_discarded() {
        let t = UNIX_EPOCH + Duration::new(1, 150);
        assert_eq!(
            FileTime::from_system_time(t).ticks(),
            UNIX_EPOCH_TICKS + TICKS_PER_SECOND + 1,
        );
    }
}
