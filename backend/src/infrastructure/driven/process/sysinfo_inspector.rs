use async_trait::async_trait;
use std::ffi::OsStr;
use std::time::Duration;
use sysinfo::{
    Pid, Process, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind,
    MINIMUM_CPU_UPDATE_INTERVAL,
};
use tracing::debug;

use crate::application::ports::{InspectionError, ProcessInspector};
use crate::domain::ProcessMetrics;

/// Finds the AFS server among local processes with `sysinfo`.
///
/// When several processes share the name, the one with the lowest PID is
/// sampled. CPU usage is measured over `cpu_sample`, which is never shorter
/// than the platform's minimum refresh interval.
pub struct SysinfoProcessInspector {
    cpu_sample: Duration,
}

impl SysinfoProcessInspector {
    pub fn new(cpu_sample: Duration) -> Self {
        Self {
            cpu_sample: cpu_sample.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    pub fn cpu_sample(&self) -> Duration {
        self.cpu_sample
    }
}

#[async_trait]
impl ProcessInspector for SysinfoProcessInspector {
    async fn locate_and_sample(
        &self,
        process_name: &str,
    ) -> Result<Option<ProcessMetrics>, InspectionError> {
        let name = process_name.to_string();
        let cpu_sample = self.cpu_sample;
        tokio::task::spawn_blocking(move || sample_by_name(&name, cpu_sample))
            .await
            .map_err(|e| InspectionError::Task(e.to_string()))
    }
}

fn refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::nothing()
        .with_cpu()
        .with_memory()
        .with_exe(UpdateKind::OnlyIfNotSet)
}

/// Blocks the calling thread for the CPU sampling interval.
fn sample_by_name(process_name: &str, cpu_sample: Duration) -> Option<ProcessMetrics> {
    let mut system = System::new();
    system.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh_kind());

    let pid = lowest_matching_pid(&system, process_name)?;
    debug!("Sampling {} (pid {})", process_name, pid);
    sample_pid(&mut system, pid, cpu_sample)
}

fn lowest_matching_pid(system: &System, process_name: &str) -> Option<Pid> {
    system
        .processes()
        .iter()
        .filter(|(_, process)| name_matches(process, process_name))
        .map(|(pid, _)| *pid)
        .min()
}

// Linux truncates the kernel-side name to 15 bytes, so the executable's
// file name counts as a match too.
fn name_matches(process: &Process, process_name: &str) -> bool {
    let wanted = OsStr::new(process_name);
    process.name() == wanted
        || process
            .exe()
            .and_then(|exe| exe.file_name())
            .is_some_and(|file| file == wanted)
}

fn sample_pid(system: &mut System, pid: Pid, cpu_sample: Duration) -> Option<ProcessMetrics> {
    std::thread::sleep(cpu_sample);
    system.refresh_processes_specifics(ProcessesToUpdate::Some(&[pid]), true, refresh_kind());

    // Gone if it exited during the sample
    let process = system.process(pid)?;
    Some(ProcessMetrics::from_raw(
        pid.as_u32(),
        process.cpu_usage(),
        process.memory(),
        process.virtual_memory(),
        thread_count(pid, process),
    ))
}

/// Only Linux exposes per-process tasks through sysinfo; elsewhere the
/// process is reported as single-threaded.
fn thread_count(pid: Pid, process: &Process) -> usize {
    match process.tasks() {
        Some(tasks) if tasks.contains(&pid) => tasks.len(),
        Some(tasks) => tasks.len() + 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own_pid() -> Pid {
        Pid::from_u32(std::process::id())
    }

    #[test]
    fn test_interval_is_clamped_to_platform_minimum() {
        let inspector = SysinfoProcessInspector::new(Duration::ZERO);
        assert_eq!(inspector.cpu_sample(), MINIMUM_CPU_UPDATE_INTERVAL);

        let long = MINIMUM_CPU_UPDATE_INTERVAL + Duration::from_millis(100);
        assert_eq!(SysinfoProcessInspector::new(long).cpu_sample(), long);
    }

    #[tokio::test]
    async fn test_unknown_process_is_absent() {
        let inspector = SysinfoProcessInspector::new(Duration::from_millis(100));
        let result = inspector
            .locate_and_sample("no-such-afs-server-process-name")
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_lowest_pid_wins() {
        let mut system = System::new();
        system.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh_kind());
        let own_name = system
            .process(own_pid())
            .map(|p| p.name().to_string_lossy().into_owned())
            .unwrap();

        let found = lowest_matching_pid(&system, &own_name).unwrap();

        assert!(found <= own_pid());
        let expected = system
            .processes()
            .iter()
            .filter(|(_, p)| p.name() == OsStr::new(&own_name))
            .map(|(pid, _)| *pid)
            .min()
            .unwrap();
        assert!(found <= expected);
    }

    #[test]
    fn test_sample_own_process() {
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[own_pid()]),
            true,
            refresh_kind(),
        );

        let metrics = sample_pid(&mut system, own_pid(), MINIMUM_CPU_UPDATE_INTERVAL).unwrap();

        assert_eq!(metrics.pid, std::process::id());
        assert!(metrics.memory_rss_mb > 0.0);
        assert!(metrics.memory_vms_mb >= metrics.memory_rss_mb);
        assert!(metrics.num_threads >= 1);
        assert!(metrics.cpu_percent >= 0.0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_thread_count_includes_spawned_threads() {
        let (release, parked) = std::sync::mpsc::channel::<()>();
        let parked = std::sync::Arc::new(std::sync::Mutex::new(parked));
        let workers: Vec<_> = (0..3)
            .map(|_| {
                let parked = parked.clone();
                std::thread::spawn(move || {
                    let _ = parked.lock().unwrap().recv();
                })
            })
            .collect();

        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[own_pid()]),
            true,
            refresh_kind(),
        );
        let metrics = sample_pid(&mut system, own_pid(), MINIMUM_CPU_UPDATE_INTERVAL).unwrap();

        drop(release);
        for worker in workers {
            worker.join().unwrap();
        }
        assert!(metrics.num_threads >= 4, "got {} threads", metrics.num_threads);
    }
}
