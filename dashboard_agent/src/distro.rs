//! Distribution name and icon from `/etc/os-release`.

use crate::error::CollectError;
use crate::ports::FileSystem;
use crate::types::{DistroInfo, GENERIC_DISTRO_NAME};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";

const ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/haroeris01/walkxcode-dashboard-icons/refs/heads/main/png";

// os-release ID -> icon name in the dashboard-icons repository
static ICON_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("arch", "arch-linux"),
        ("opensuse-leap", "opensuse"),
        ("opensuse-tumbleweed", "opensuse"),
        ("raspbian", "raspberry-pi"),
        ("rhel", "red-hat"),
        ("linuxmint", "linux-mint"),
        ("pop", "pop-os"),
        ("elementary", "elementary-os"),
    ])
});

/// Icon name for a lower-cased os-release `ID`; unknown ids pass through.
pub fn icon_name(id: &str) -> &str {
    ICON_ALIASES.get(id).copied().unwrap_or(id)
}

pub fn icon_url(id: &str) -> String {
    format!("{ICON_BASE_URL}/{}.png", icon_name(id))
}

/// `KEY=value` pairs, with one layer of matching single or double quotes removed.
/// Blank lines, comments and lines without `=` are skipped.
pub fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), unquote(v.trim()).to_string()))
        .collect()
}

fn unquote(v: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = v.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner;
        }
    }
    v
}

pub fn distro_info(fields: &HashMap<String, String>) -> DistroInfo {
    let name = fields
        .get("PRETTY_NAME")
        .filter(|n| !n.is_empty())
        .cloned()
        .unwrap_or_else(|| GENERIC_DISTRO_NAME.to_string());
    let icon_url = fields
        .get("ID")
        .map(|id| id.to_lowercase())
        .filter(|id| !id.is_empty())
        .map(|id| icon_url(&id));
    DistroInfo { name, icon_url }
}

pub struct DistroIdentifier<'a, F: FileSystem> {
    fs: &'a F,
    path: PathBuf,
}

impl<'a, F: FileSystem> DistroIdentifier<'a, F> {
    pub fn new(fs: &'a F, os_release: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: os_release.into(),
        }
    }

    pub async fn identify(&self) -> DistroInfo {
        match self.try_identify().await {
            Ok(d) => d,
            Err(e) => {
                warn!("distro identity unavailable: {e}");
                DistroInfo::default()
            }
        }
    }

    async fn try_identify(&self) -> Result<DistroInfo, CollectError> {
        let content = self
            .fs
            .read_to_string(&self.path)
            .await
            .map_err(|e| CollectError::unavailable(&self.path, e))?;
        Ok(distro_info(&parse_os_release(&content)))
    }
}
