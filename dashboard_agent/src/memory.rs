//! Memory usage from `/proc/meminfo`.

use crate::error::CollectError;
use crate::ports::FileSystem;
use crate::types::{ratio_percent, MemoryStats, BYTES_PER_GIB};
use std::path::PathBuf;
use tracing::warn;

/// Raw `MemTotal`/`MemAvailable` in KiB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kib: u64,
    pub available_kib: u64,
}

/// Value of a `Key:   1234 kB` line, unit stripped.
fn field_value(line: &str, key: &str) -> Option<u64> {
    let (k, rest) = line.split_once(':')?;
    if k.trim() != key {
        return None;
    }
    rest.split_whitespace().next()?.parse().ok()
}

/// `MemTotal` is required. A missing `MemAvailable` (pre-3.14 kernels) reads as 0.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, CollectError> {
    let mut total = None;
    let mut available = None;
    for line in content.lines() {
        if total.is_none() {
            total = field_value(line, "MemTotal");
        }
        if available.is_none() {
            available = field_value(line, "MemAvailable");
        }
        if total.is_some() && available.is_some() {
            break;
        }
    }
    let total_kib = total.ok_or_else(|| CollectError::malformed("meminfo", "no MemTotal"))?;
    Ok(MemInfo {
        total_kib,
        available_kib: available.unwrap_or(0),
    })
}

impl MemInfo {
    pub fn stats(&self) -> MemoryStats {
        let total = self.total_kib.saturating_mul(1024);
        let available = self.available_kib.saturating_mul(1024);
        let used = total.saturating_sub(available);
        MemoryStats {
            total_bytes: total,
            used_bytes: used,
            percent: ratio_percent(used, total),
            used_gb: format!("{:.1}", used as f64 / BYTES_PER_GIB),
            total_gb: format!("{:.1}", total as f64 / BYTES_PER_GIB),
        }
    }
}

pub struct MemInfoReader<'a, F: FileSystem> {
    fs: &'a F,
    path: PathBuf,
}

impl<'a, F: FileSystem> MemInfoReader<'a, F> {
    pub fn new(fs: &'a F, proc_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: proc_root.into().join("meminfo"),
        }
    }

    pub async fn read(&self) -> MemoryStats {
        match self.try_read().await {
            Ok(m) => m.stats(),
            Err(e) => {
                warn!("memory stats unavailable: {e}");
                MemoryStats::default()
            }
        }
    }

    async fn try_read(&self) -> Result<MemInfo, CollectError> {
        let content = self
            .fs
            .read_to_string(&self.path)
            .await
            .map_err(|e| CollectError::unavailable(&self.path, e))?;
        parse_meminfo(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFs;

    const MEMINFO: &str = "MemTotal:        1024000 kB\n\
                           MemFree:          100000 kB\n\
                           MemAvailable:     512000 kB\n\
                           Buffers:           20000 kB\n";

    #[test]
    fn half_used() {
        let m = parse_meminfo(MEMINFO).unwrap().stats();
        assert_eq!(m.total_bytes, 1_048_576_000);
        assert_eq!(m.used_bytes, 524_288_000);
        assert_eq!(m.percent, 50);
        assert_eq!(m.total_gb, "1.0");
        assert_eq!(m.used_gb, "0.5");
    }

    #[test]
    fn zero_total_is_zero_percent() {
        let m = parse_meminfo("MemTotal: 0 kB\nMemAvailable: 0 kB\n")
            .unwrap()
            .stats();
        assert_eq!(m.percent, 0);
        assert_eq!(m.used_gb, "0.0");
    }

    #[test]
    fn available_above_total_clamps_used() {
        let m = parse_meminfo("MemTotal: 100 kB\nMemAvailable: 200 kB\n")
            .unwrap()
            .stats();
        assert_eq!(m.used_bytes, 0);
        assert_eq!(m.percent, 0);
    }

    #[test]
    fn key_must_match_exactly() {
        // "MemTotalX" must not be taken for MemTotal
        assert!(parse_meminfo("MemTotalX: 5 kB\n").is_err());
    }

    #[test]
    fn missing_available_counts_as_zero() {
        let m = parse_meminfo("MemTotal: 2048 kB\n").unwrap().stats();
        assert_eq!(m.percent, 100);
    }

    #[tokio::test]
    async fn reader_falls_back_on_failure() {
        let fs = MockFs::new();
        assert_eq!(
            MemInfoReader::new(&fs, "/proc").read().await,
            MemoryStats::default()
        );

        let fs = MockFs::new().with_file("/proc/meminfo", "garbage\n");
        let m = MemInfoReader::new(&fs, "/proc").read().await;
        assert_eq!(m.percent, 0);
        assert_eq!(m.total_gb, "0.0");
    }

    #[tokio::test]
    async fn reader_uses_proc_root() {
        let fs = MockFs::new().with_file("/host/proc/meminfo", MEMINFO);
        let m = MemInfoReader::new(&fs, "/host/proc").read().await;
        assert_eq!(m.percent, 50);
    }
}
