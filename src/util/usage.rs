//! Resource usage arithmetic for cluster cards and the dashboard.

#[cfg(test)]
#[path = "usage_test.rs"]
mod usage_test;

use crate::net::types::{Cluster, VirtualMachine, VmStatus};

pub const WARNING_PERCENT: f64 = 70.0;
pub const CRITICAL_PERCENT: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn of(percent: f64) -> Self {
        if percent >= CRITICAL_PERCENT {
            Self::Critical
        } else if percent >= WARNING_PERCENT {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Normal => "usage-bar__fill--normal",
            Self::Warning => "usage-bar__fill--warning",
            Self::Critical => "usage-bar__fill--critical",
        }
    }
}

/// `used / total` as a percentage in `[0, 100]`. A non-positive total reads
/// as 0%.
pub fn percent(used: f64, total: f64) -> f64 {
    if total <= 0.0 || !total.is_finite() || !used.is_finite() {
        return 0.0;
    }
    (used / total * 100.0).clamp(0.0, 100.0)
}

/// Usage percentage from a capacity and what is still free.
pub fn percent_from_available(total: f64, available: f64) -> f64 {
    percent(total - available, total)
}

/// One labelled bar.
#[derive(Clone, Debug, PartialEq)]
pub struct UsageBar {
    pub label: &'static str,
    pub percent: f64,
    pub severity: Severity,
}

impl UsageBar {
    pub fn new(label: &'static str, percent: f64) -> Self {
        Self { label, percent, severity: Severity::of(percent) }
    }

    /// Percentage rounded for display, e.g. `"42%"`.
    pub fn display(&self) -> String {
        format!("{:.0}%", self.percent.round())
    }
}

/// Storage, memory and CPU bars for one cluster. `available_processor` is
/// already a free percentage.
pub fn cluster_bars(cluster: &Cluster) -> [UsageBar; 3] {
    let spec = &cluster.spec;
    [
        UsageBar::new("Storage", percent_from_available(f64::from(spec.rom), f64::from(spec.available_rom))),
        UsageBar::new("Memory", percent_from_available(f64::from(spec.ram), f64::from(spec.available_ram))),
        UsageBar::new("CPU", percent_from_available(100.0, spec.available_processor)),
    ]
}

/// Machine counts by state for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VmCounts {
    pub total: usize,
    pub running: usize,
    pub stopped: usize,
    pub other: usize,
}

impl VmCounts {
    pub fn tally(vms: &[VirtualMachine]) -> Self {
        vms.iter().fold(Self::default(), |mut acc, vm| {
            acc.total += 1;
            match vm.status {
                VmStatus::Running => acc.running += 1,
                VmStatus::Stopped | VmStatus::Created => acc.stopped += 1,
                _ => acc.other += 1,
            }
            acc
        })
    }
}

/// Allocated resources across a user's machines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    pub vcpus: u64,
    pub memory_mib: u64,
    pub disk_gb: u64,
}

impl Allocation {
    /// Sum of the sizes of every machine that still exists.
    pub fn of(vms: &[VirtualMachine]) -> Self {
        vms.iter()
            .filter(|vm| vm.status != VmStatus::Deleted)
            .fold(Self::default(), |acc, vm| Self {
                vcpus: acc.vcpus + u64::from(vm.vcpu_count.unwrap_or(0)),
                memory_mib: acc.memory_mib + u64::from(vm.memory_size_mib.unwrap_or(0)),
                disk_gb: acc.disk_gb + u64::from(vm.disk_size_gb.unwrap_or(0)),
            })
    }

    /// Share of the allocated vCPUs that belong to running machines.
    #[allow(clippy::cast_precision_loss)]
    pub fn running_share(vms: &[VirtualMachine]) -> f64 {
        let all = Self::of(vms).vcpus;
        let running: u64 = vms
            .iter()
            .filter(|vm| vm.status == VmStatus::Running)
            .map(|vm| u64::from(vm.vcpu_count.unwrap_or(0)))
            .sum();
        percent(running as f64, all as f64)
    }
}
