//! CPU utilization from `/proc/stat` tick deltas.

use crate::error::CollectError;
use crate::ports::FileSystem;
use crate::types::{CpuLoad, CpuSample};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// The eight accounted tick categories of the aggregate `cpu` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTicks {
    // iowait is idle time and also one of the eight summed categories.
    pub fn sample(&self) -> CpuSample {
        let total = [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v));
        CpuSample {
            idle_ticks: self.idle.saturating_add(self.iowait),
            total_ticks: total,
        }
    }
}

/// Parses "cpu  user nice system idle iowait irq softirq steal ...".
/// Missing or non-numeric fields count as zero; trailing fields are ignored.
pub fn parse_cpu_line(line: &str) -> CpuTicks {
    let mut it = line.split_whitespace();
    let _label = it.next();
    let mut v = [0u64; 8];
    for (slot, tok) in v.iter_mut().zip(it) {
        *slot = tok.parse().unwrap_or(0);
    }
    CpuTicks {
        user: v[0],
        nice: v[1],
        system: v[2],
        idle: v[3],
        iowait: v[4],
        irq: v[5],
        softirq: v[6],
        steal: v[7],
    }
}

/// Utilization over the window between two samples, in whole percent.
pub fn cpu_percent(before: CpuSample, after: CpuSample) -> u8 {
    let d_idle = after.idle_ticks as i128 - before.idle_ticks as i128;
    let d_total = after.total_ticks as i128 - before.total_ticks as i128;
    if d_total <= 0 {
        return 0;
    }
    let idle_pct = (100 * d_idle).div_euclid(d_total);
    (100 - idle_pct).clamp(0, 100) as u8
}

pub struct ProcStatReader<'a, F: FileSystem> {
    fs: &'a F,
    path: PathBuf,
}

impl<'a, F: FileSystem> ProcStatReader<'a, F> {
    pub fn new(fs: &'a F, proc_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: proc_root.into().join("stat"),
        }
    }

    /// Never fails: an unreadable source reads as all-zero counters.
    pub async fn read(&self) -> CpuSample {
        match self.try_read().await {
            Ok(s) => s,
            Err(e) => {
                warn!("cpu counters unavailable: {e}");
                CpuSample::default()
            }
        }
    }

    async fn try_read(&self) -> Result<CpuSample, CollectError> {
        let s = self
            .fs
            .read_to_string(&self.path)
            .await
            .map_err(|e| CollectError::unavailable(&self.path, e))?;
        let line = s.lines().next().unwrap_or("");
        Ok(parse_cpu_line(line).sample())
    }
}

pub struct CpuLoadSampler<'a, F: FileSystem> {
    reader: ProcStatReader<'a, F>,
}

impl<'a, F: FileSystem> CpuLoadSampler<'a, F> {
    pub fn new(reader: ProcStatReader<'a, F>) -> Self {
        Self { reader }
    }

    pub async fn sample(&self, interval: Duration) -> CpuLoad {
        let before = self.reader.read().await;
        sleep(interval).await;
        let after = self.reader.read().await;
        let percent = cpu_percent(before, after);
        debug!(?before, ?after, percent, "cpu sampled");
        CpuLoad { percent }
    }
}
