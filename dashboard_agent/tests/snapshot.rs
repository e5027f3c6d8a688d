//! End-to-end snapshot assembly against synthetic /proc, os-release and df.

use dashboard_agent::collector::Collector;
use dashboard_agent::config::CollectorConfig;
use dashboard_agent::mock::{MockFs, MockRunner};
use std::path::PathBuf;
use std::time::Duration;

const STAT_BEFORE: &str = "cpu  100 0 50 700 10 0 0 0 0 0\ncpu0 50 0 25 350 5 0 0 0 0 0\nintr 1234\n";
const STAT_AFTER: &str = "cpu  120 0 60 850 12 0 0 0 0 0\ncpu0 60 0 30 425 6 0 0 0 0 0\nintr 1300\n";

const MEMINFO: &str = "MemTotal:        1024000 kB\nMemFree:          300000 kB\nMemAvailable:     512000 kB\n";

const OS_RELEASE: &str = "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\nBUILD_ID=rolling\n";

const DF: &str = "Filesystem      1B-blocks        Used   Available Use% Mounted on\n/dev/sda2    107374182400 53687091200 53687091200  50% /\n";

fn cfg() -> CollectorConfig {
    CollectorConfig {
        cpu_interval: Duration::from_millis(5),
        df_timeout: Duration::from_secs(2),
        mount_point: "/".into(),
        proc_root: PathBuf::from("/proc"),
        os_release: PathBuf::from("/etc/os-release"),
    }
}

fn fixture_fs() -> MockFs {
    MockFs::new()
        .with_sequence("/proc/stat", [STAT_BEFORE, STAT_AFTER])
        .with_file("/proc/meminfo", MEMINFO)
        .with_file("/etc/os-release", OS_RELEASE)
}

#[tokio::test]
async fn full_snapshot_from_fixtures() {
    let runner = MockRunner::stdout(DF);
    let collector = Collector::new(fixture_fs(), runner.clone(), cfg());
    let snap = collector.collect().await.expect("snapshot");

    assert_eq!(snap.cpu.percent, 17);

    assert_eq!(snap.memory.used_bytes, 524_288_000);
    assert_eq!(snap.memory.percent, 50);
    assert_eq!(snap.memory.total_gb, "1.0");
    assert_eq!(snap.memory.used_gb, "0.5");

    assert_eq!(snap.storage.total_bytes, 107_374_182_400);
    assert_eq!(snap.storage.percent, 50);
    assert_eq!(snap.storage.total_gb, "100");
    assert_eq!(snap.storage.used_gb, "50");
    assert_eq!(runner.calls(), vec![vec!["df", "-B1", "/"]]);

    assert_eq!(snap.device.distro, "Arch Linux");
    assert!(snap
        .device
        .icon
        .as_deref()
        .is_some_and(|u| u.ends_with("/png/arch-linux.png")));
}

#[tokio::test]
async fn repeated_collect_is_stable_for_unchanged_sources() {
    let stat = "cpu  100 0 50 700 10 0 0 0\n";
    let fs = MockFs::new()
        .with_file("/proc/stat", stat)
        .with_file("/proc/meminfo", MEMINFO)
        .with_file("/etc/os-release", OS_RELEASE);
    let collector = Collector::new(fs, MockRunner::stdout(DF), cfg());

    let a = collector.collect().await.unwrap();
    let b = collector.collect().await.unwrap();
    assert_eq!(a.memory, b.memory);
    assert_eq!(a.storage, b.storage);
    assert_eq!(a.device, b.device);
    // frozen counters mean no elapsed ticks
    assert_eq!(a.cpu.percent, 0);
    assert_eq!(b.cpu.percent, 0);
}

#[tokio::test]
async fn hung_df_degrades_storage_only() {
    let runner = MockRunner::stdout(DF).delayed(Duration::from_secs(30));
    let collector = Collector::new(
        fixture_fs(),
        runner,
        CollectorConfig {
            df_timeout: Duration::from_millis(50),
            ..cfg()
        },
    );
    let snap = collector.collect().await.unwrap();
    assert_eq!(snap.storage.percent, 0);
    assert_eq!(snap.storage.used_gb, "0");
    assert_eq!(snap.cpu.percent, 17);
    assert_eq!(snap.memory.percent, 50);
    assert_eq!(snap.device.distro, "Arch Linux");
}

#[tokio::test]
async fn dropped_collect_does_not_wait_for_df() {
    let runner = MockRunner::stdout(DF).delayed(Duration::from_secs(30));
    let collector = Collector::new(
        fixture_fs(),
        runner,
        CollectorConfig {
            df_timeout: Duration::from_secs(60),
            ..cfg()
        },
    );
    let res = tokio::time::timeout(Duration::from_millis(100), collector.collect()).await;
    assert!(res.is_err(), "caller gave up; collection must be abandoned");
}
