//! Filesystem usage of a mount point via `df -B1`.

use crate::error::CollectError;
use crate::ports::ProcessRunner;
use crate::types::{ratio_percent, StorageStats, BYTES_PER_GIB};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

pub const DEFAULT_DF_TIMEOUT: Duration = Duration::from_secs(2);

/// Parses `df -B1` output: a header line, then
/// "Filesystem 1B-blocks Used Available Use% Mounted on".
pub fn parse_df(stdout: &str) -> Result<StorageStats, CollectError> {
    let line = stdout
        .trim()
        .lines()
        .nth(1)
        .ok_or_else(|| CollectError::malformed("df output", "no data line"))?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(CollectError::malformed(
            "df output",
            format!("expected at least 3 fields, got {}", fields.len()),
        ));
    }
    let total: u64 = fields[1].parse().unwrap_or(0);
    let used: u64 = fields[2].parse().unwrap_or(0);
    Ok(StorageStats {
        total_bytes: total,
        used_bytes: used,
        percent: ratio_percent(used, total),
        used_gb: format!("{:.0}", used as f64 / BYTES_PER_GIB),
        total_gb: format!("{:.0}", total as f64 / BYTES_PER_GIB),
    })
}

pub struct StorageProbe<'a, R: ProcessRunner> {
    runner: &'a R,
    limit: Duration,
}

impl<'a, R: ProcessRunner> StorageProbe<'a, R> {
    pub fn new(runner: &'a R, limit: Duration) -> Self {
        Self { runner, limit }
    }

    pub async fn probe(&self, mount_point: &str) -> StorageStats {
        match self.try_probe(mount_point).await {
            Ok(s) => s,
            Err(e) => {
                warn!(mount = mount_point, "storage stats unavailable: {e}");
                StorageStats::default()
            }
        }
    }

    async fn try_probe(&self, mount_point: &str) -> Result<StorageStats, CollectError> {
        // The runner future owns the child; dropping it on timeout kills df.
        let out = timeout(self.limit, self.runner.run("df", &["-B1", mount_point]))
            .await
            .map_err(|_| CollectError::Timeout(self.limit))?
            .map_err(|e| CollectError::ProcessFailure(format!("df: {e}")))?;
        if !out.success {
            return Err(CollectError::ProcessFailure(format!(
                "df exited with error: {}",
                out.stderr.trim()
            )));
        }
        let stats = parse_df(&out.stdout)?;
        debug!(mount = mount_point, percent = stats.percent, "storage probed");
        Ok(stats)
    }
}
