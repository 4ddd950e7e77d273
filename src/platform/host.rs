//! Host capabilities backed by sysinfo (and statvfs on unix).

use std::ffi::{OsStr, OsString};
use std::path::Path;

use sysinfo::{
    CpuRefreshKind, MemoryRefreshKind, ProcessRefreshKind, RefreshKind, System, UpdateKind,
};

use crate::core::health::{
    CpuLoad, FilesystemUsage, MemoryAccounting, MemoryUsage, ProcessTable, SpaceUsage,
};
use crate::error::ProbeError;

/// Reads live system state. Every query takes a fresh snapshot, so the host holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoHost;

impl SysinfoHost {
    pub fn new() -> Self {
        Self
    }
}

impl FilesystemUsage for SysinfoHost {
    fn usage(&self, path: &Path) -> Result<SpaceUsage, ProbeError> {
        #[cfg(unix)]
        {
            statvfs_usage(path)
        }

        #[cfg(not(unix))]
        {
            mount_point_usage(path)
        }
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_cast)]
fn statvfs_usage(path: &Path) -> Result<SpaceUsage, ProbeError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        ProbeError::query(format!("path {} contains a NUL byte", path.display()))
    })?;

    // SAFETY: statvfs only writes into the zeroed struct we own, and c_path is NUL terminated.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        let err = std::io::Error::last_os_error();
        return Err(ProbeError::unavailable(format!(
            "cannot read filesystem stats for {}: {}",
            path.display(),
            err
        )));
    }

    let fragment = stat.f_frsize as u64;
    let total = (stat.f_blocks as u64).saturating_mul(fragment);
    let free = (stat.f_bfree as u64).saturating_mul(fragment);
    let available = (stat.f_bavail as u64).saturating_mul(fragment);

    Ok(SpaceUsage {
        total_bytes: total,
        used_bytes: total.saturating_sub(free),
        available_bytes: available,
    })
}

/// Picks the disk with the longest mount point that contains `path`.
#[cfg(not(unix))]
fn mount_point_usage(path: &Path) -> Result<SpaceUsage, ProbeError> {
    use sysinfo::Disks;

    let canonical = path.canonicalize().map_err(|e| {
        ProbeError::unavailable(format!("cannot resolve {}: {}", path.display(), e))
    })?;

    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|disk| canonical.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .ok_or_else(|| {
            ProbeError::unavailable(format!("no mounted filesystem holds {}", path.display()))
        })?;

    let total = disk.total_space();
    let available = disk.available_space();

    Ok(SpaceUsage {
        total_bytes: total,
        used_bytes: total.saturating_sub(available),
        available_bytes: available,
    })
}

impl MemoryAccounting for SysinfoHost {
    fn memory(&self) -> Result<MemoryUsage, ProbeError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ProbeError::unavailable(
                "memory accounting is not exposed on this platform",
            ));
        }

        let refresh = RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());
        let sys = System::new_with_specifics(refresh);

        let total = sys.total_memory();
        if total == 0 {
            return Err(ProbeError::unavailable(
                "host reported zero total memory",
            ));
        }

        Ok(MemoryUsage {
            total_bytes: total,
            available_bytes: sys.available_memory(),
        })
    }
}

impl ProcessTable for SysinfoHost {
    fn count_running(&self, name: &str) -> Result<usize, ProbeError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ProbeError::unavailable(
                "process table is not exposed on this platform",
            ));
        }

        // Threads show up as tasks on Linux; only whole processes count
        let mut kind = ProcessRefreshKind::nothing().without_tasks();
        if name.len() > COMM_LEN {
            kind = kind
                .with_exe(UpdateKind::OnlyIfNotSet)
                .with_cmd(UpdateKind::OnlyIfNotSet);
        }
        let sys = System::new_with_specifics(RefreshKind::nothing().with_processes(kind));

        let count = sys
            .processes()
            .values()
            .filter(|process| process.thread_kind().is_none())
            .filter(|process| {
                name_matches(process.name(), process.exe(), process.cmd(), name)
            })
            .count();

        Ok(count)
    }
}

/// Longest process name the Linux kernel keeps in `comm`.
const COMM_LEN: usize = 15;

/// Exact match on the process name. Names longer than `comm` can hold are
/// compared against the truncated name and then the executable basename.
fn name_matches(process_name: &OsStr, exe: Option<&Path>, cmd: &[OsString], wanted: &str) -> bool {
    if process_name == OsStr::new(wanted) {
        return true;
    }
    if wanted.len() <= COMM_LEN
        || process_name.as_encoded_bytes() != &wanted.as_bytes()[..COMM_LEN]
    {
        return false;
    }

    let wanted = OsStr::new(wanted);
    let exe_name = exe.and_then(Path::file_name);
    let argv0_name = cmd.first().and_then(|arg| Path::new(arg).file_name());
    exe_name == Some(wanted) || argv0_name == Some(wanted)
}

impl CpuLoad for SysinfoHost {
    fn cpu_usage_percent(&self) -> Result<f64, ProbeError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ProbeError::unavailable(
                "CPU usage is not exposed on this platform",
            ));
        }

        let refresh = RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage());
        let mut sys = System::new_with_specifics(refresh);

        // Usage is a delta between two refreshes
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();

        if sys.cpus().is_empty() {
            return Err(ProbeError::unavailable("no CPUs reported by the host"));
        }

        Ok(sys.global_cpu_usage() as f64)
    }
}
