//! Snapshot assembly: runs every collector and merges their results.

use crate::config::CollectorConfig;
use crate::cpu::{CpuLoadSampler, ProcStatReader};
use crate::distro::DistroIdentifier;
use crate::memory::MemInfoReader;
use crate::ports::{FileSystem, ProcessRunner, RealFs, TokioRunner};
use crate::storage::StorageProbe;
use crate::types::{DeviceInfo, TelemetrySnapshot};
use std::time::Instant;
use sysinfo::System;
use tracing::debug;

const UNKNOWN: &str = "unknown";

pub type LiveCollector = Collector<RealFs, TokioRunner>;

/// Builds one [`TelemetrySnapshot`] per call. Holds no state between calls;
/// concurrent calls each take their own CPU baseline and run their own `df`.
pub struct Collector<F: FileSystem, R: ProcessRunner> {
    fs: F,
    runner: R,
    cfg: CollectorConfig,
}

impl LiveCollector {
    pub fn live(cfg: CollectorConfig) -> Self {
        Collector::new(RealFs, TokioRunner, cfg)
    }
}

impl<F: FileSystem, R: ProcessRunner> Collector<F, R> {
    pub fn new(fs: F, runner: R, cfg: CollectorConfig) -> Self {
        Self { fs, runner, cfg }
    }

    /// Collectors run concurrently on the calling task, so dropping this
    /// future cancels the CPU wait and kills a running `df`.
    pub async fn collect(&self) -> anyhow::Result<TelemetrySnapshot> {
        anyhow::ensure!(
            !self.cfg.cpu_interval.is_zero(),
            "cpu sampling window must be positive"
        );
        let started = Instant::now();

        let cpu = CpuLoadSampler::new(ProcStatReader::new(&self.fs, &self.cfg.proc_root));
        let memory = MemInfoReader::new(&self.fs, &self.cfg.proc_root);
        let storage = StorageProbe::new(&self.runner, self.cfg.df_timeout);
        let distro = DistroIdentifier::new(&self.fs, &self.cfg.os_release);

        let (cpu, memory, storage, distro) = tokio::join!(
            cpu.sample(self.cfg.cpu_interval),
            memory.read(),
            storage.probe(&self.cfg.mount_point),
            distro.identify(),
        );

        let snapshot = TelemetrySnapshot {
            device: DeviceInfo {
                platform: platform_name(),
                distro: distro.name,
                icon: distro.icon_url,
                kernel_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.into()),
                hostname: host_name(),
            },
            cpu,
            memory,
            storage,
        };
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "snapshot collected");
        Ok(snapshot)
    }
}

fn platform_name() -> String {
    match std::env::consts::OS {
        "linux" => "Linux".into(),
        "macos" => "macOS".into(),
        "windows" => "Windows".into(),
        other => other.into(),
    }
}

fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|s| s.into_string().ok())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.into())
}
