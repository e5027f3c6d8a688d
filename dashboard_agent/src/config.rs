//! Agent configuration: CLI port flag plus `DASHBOARD_AGENT_*` environment toggles.

use crate::cpu::DEFAULT_SAMPLE_INTERVAL;
use crate::distro::DEFAULT_OS_RELEASE;
use crate::storage::DEFAULT_DF_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;

pub const USAGE: &str = "Usage: dashboard_agent [--port PORT|-p PORT]\n\
\n\
Environment:\n  \
PORT                            listen port when no flag is given (default 3000)\n  \
DASHBOARD_AGENT_CPU_SAMPLE_MS   CPU sampling window (default 100)\n  \
DASHBOARD_AGENT_DF_TIMEOUT_MS   limit for the df probe (default 2000)\n  \
DASHBOARD_AGENT_MOUNT           mount point to report storage for (default /)\n  \
DASHBOARD_AGENT_PROC_ROOT       proc filesystem root (default /proc)\n  \
DASHBOARD_AGENT_OS_RELEASE      os-release file (default /etc/os-release)\n  \
RUST_LOG                        log filter (default dashboard_agent=info)";

/// Where and how often the collector looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub cpu_interval: Duration,
    pub df_timeout: Duration,
    pub mount_point: String,
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            cpu_interval: DEFAULT_SAMPLE_INTERVAL,
            df_timeout: DEFAULT_DF_TIMEOUT,
            mount_point: "/".into(),
            proc_root: PathBuf::from("/proc"),
            os_release: PathBuf::from(DEFAULT_OS_RELEASE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub port: u16,
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Run(Option<u16>),
    Help,
}

/// Accepts `--port N`, `-p N` and `--port=N`; the long form wins over `-p`.
/// An unparseable value is ignored so the env/default port applies.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> CliAction {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut long: Option<String> = None;
    let mut short: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "-h" | "--help" => return CliAction::Help,
            "--port" => long = it.next(),
            "-p" => short = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    long = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    CliAction::Run(long.or(short).and_then(|s| s.parse::<u16>().ok()))
}

impl AgentConfig {
    /// Builds the config from a flag value and an environment lookup.
    pub fn resolve<E>(cli_port: Option<u16>, env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, default: Duration| {
            env(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(default)
        };
        let defaults = CollectorConfig::default();
        let port = cli_port
            .or_else(|| env("PORT").and_then(|v| v.trim().parse().ok()))
            .unwrap_or(DEFAULT_PORT);
        AgentConfig {
            port,
            collector: CollectorConfig {
                cpu_interval: millis("DASHBOARD_AGENT_CPU_SAMPLE_MS", defaults.cpu_interval),
                df_timeout: millis("DASHBOARD_AGENT_DF_TIMEOUT_MS", defaults.df_timeout),
                mount_point: env("DASHBOARD_AGENT_MOUNT")
                    .filter(|v| !v.is_empty())
                    .unwrap_or(defaults.mount_point),
                proc_root: env("DASHBOARD_AGENT_PROC_ROOT")
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
                    .unwrap_or(defaults.proc_root),
                os_release: env("DASHBOARD_AGENT_OS_RELEASE")
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
                    .unwrap_or(defaults.os_release),
            },
        }
    }

    pub fn from_env(cli_port: Option<u16>) -> Self {
        Self::resolve(cli_port, |k| std::env::var(k).ok())
    }
}
