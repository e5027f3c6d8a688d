//! Snapshot types returned to the dashboard front end.
//! Keep this module minimal and stable — it defines the wire format.

use serde::Serialize;

/// Cumulative CPU counters at one instant, in ticks since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub idle_ticks: u64,
    pub total_ticks: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuLoad {
    pub percent: u8,
}

// The front end reads both keys; they always carry the same value.
impl Serialize for CpuLoad {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("CpuLoad", 2)?;
        s.serialize_field("percent", &self.percent)?;
        s.serialize_field("load", &self.percent)?;
        s.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: u8,
    #[serde(rename = "usedGB")]
    pub used_gb: String,
    #[serde(rename = "totalGB")]
    pub total_gb: String,
}

impl Default for MemoryStats {
    fn default() -> Self {
        Self {
            total_bytes: 0,
            used_bytes: 0,
            percent: 0,
            used_gb: "0.0".into(),
            total_gb: "0.0".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: u8,
    #[serde(rename = "usedGB")]
    pub used_gb: String,
    #[serde(rename = "totalGB")]
    pub total_gb: String,
}

impl Default for StorageStats {
    fn default() -> Self {
        Self {
            total_bytes: 0,
            used_bytes: 0,
            percent: 0,
            used_gb: "0".into(),
            total_gb: "0".into(),
        }
    }
}

pub const GENERIC_DISTRO_NAME: &str = "Linux";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistroInfo {
    pub name: String,
    pub icon_url: Option<String>,
}

impl Default for DistroInfo {
    fn default() -> Self {
        Self {
            name: GENERIC_DISTRO_NAME.into(),
            icon_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub platform: String,
    pub distro: String,
    pub icon: Option<String>,
    pub kernel_version: String,
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetrySnapshot {
    pub device: DeviceInfo,
    pub cpu: CpuLoad,
    pub memory: MemoryStats,
    pub storage: StorageStats,
}

/// Shared percentage rule for memory and storage: rounded, 0 when `total` is 0.
pub(crate) fn ratio_percent(used: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (used as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

pub(crate) const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;
