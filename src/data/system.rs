//! Data source probing the host the dashboard runs on.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use sysinfo::{Networks, System};

use super::{BoardInfo, DataSource, LocalInterfaces};

/// Device-tree model string, present on most ARM boards.
const DEVICE_TREE_MODEL: &str = "/proc/device-tree/model";

/// Live data source for the local host.
///
/// Board metadata and interfaces are probed once; uptime is read on every
/// call.
#[derive(Debug, Clone)]
pub struct SystemSource {
    elevated: bool,
    board: BoardInfo,
    interfaces: Option<LocalInterfaces>,
}

impl SystemSource {
    /// Probes the host.
    pub fn probe() -> Self {
        let source = Self {
            elevated: running_as_root(),
            board: probe_board(),
            interfaces: probe_interfaces(),
        };
        tracing::debug!(
            elevated = source.elevated,
            machine = ?source.board.machine,
            "probed local system"
        );
        source
    }
}

impl DataSource for SystemSource {
    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn uptime(&self) -> Option<Duration> {
        Some(Duration::from_secs(System::uptime()))
    }

    fn board(&self) -> Option<&BoardInfo> {
        Some(&self.board)
    }

    fn local_interfaces(&self) -> Option<&LocalInterfaces> {
        self.interfaces.as_ref()
    }

    fn version(&self) -> Option<&str> {
        Some(crate::VERSION)
    }
}

/// `/proc/self` is owned by the effective user of the reading process.
fn running_as_root() -> bool {
    #[cfg(target_os = "linux")]
    {
        use std::os::unix::fs::MetadataExt;
        std::fs::metadata("/proc/self")
            .map(|meta| meta.uid() == 0)
            .unwrap_or(false)
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

fn probe_board() -> BoardInfo {
    let machine = read_device_tree_model(Path::new(DEVICE_TREE_MODEL)).or_else(System::name);

    let mut hardware = BTreeMap::new();
    hardware.insert("Architecture".to_string(), std::env::consts::ARCH.to_string());
    if let Some(kernel) = System::kernel_version() {
        hardware.insert("Kernel".to_string(), kernel);
    }
    if let Some(os) = System::os_version() {
        hardware.insert("OS version".to_string(), os);
    }
    hardware.insert("Distribution".to_string(), System::distribution_id());

    BoardInfo {
        machine,
        software: System::long_os_version(),
        hardware,
        libraries: BTreeMap::new(),
    }
}

/// Device-tree strings are NUL terminated.
fn read_device_tree_model(path: &Path) -> Option<String> {
    let raw = std::fs::read(path).ok()?;
    let model = String::from_utf8_lossy(&raw)
        .trim_end_matches('\0')
        .trim()
        .to_string();
    (!model.is_empty()).then_some(model)
}

fn probe_interfaces() -> Option<LocalInterfaces> {
    let networks = Networks::new_with_refreshed_list();
    let interfaces: BTreeMap<String, String> = networks
        .iter()
        .filter_map(|(name, data)| {
            data.ip_networks()
                .iter()
                .map(|net| net.addr)
                .find(|addr| matches!(addr, IpAddr::V4(v4) if !v4.is_loopback()))
                .map(|addr| (name.clone(), addr.to_string()))
        })
        .collect();

    let hostname = System::host_name();
    if hostname.is_none() && interfaces.is_empty() {
        return None;
    }
    Some(LocalInterfaces {
        hostname,
        interfaces,
    })
}
