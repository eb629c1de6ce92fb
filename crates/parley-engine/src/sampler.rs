//! System resource sampling.
//!
//! The executor only formats what a [`ResourceSampler`] hands back. The
//! `sysinfo` feature provides a real sampler; without it every query reports
//! the facility as not installed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct MemorySample {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub owner: Option<String>,
}

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("{facility} not installed")]
    Unavailable { facility: &'static str },
    #[error("{0}")]
    Failed(String),
}

pub trait ResourceSampler: Send + Sync {
    /// Per-core utilization in percent. May block for a sampling interval.
    fn cpu(&self) -> Result<Vec<f32>, SamplerError>;

    fn memory(&self) -> Result<MemorySample, SamplerError>;

    /// At most `limit` processes, ordered by pid.
    fn processes(&self, limit: usize) -> Result<Vec<ProcessSample>, SamplerError>;
}

/// Sampler for builds without a resource backend.
#[derive(Debug, Clone, Copy)]
pub struct UnavailableSampler {
    pub facility: &'static str,
}

impl Default for UnavailableSampler {
    fn default() -> Self {
        Self {
            facility: "sysinfo",
        }
    }
}

impl ResourceSampler for UnavailableSampler {
    fn cpu(&self) -> Result<Vec<f32>, SamplerError> {
        Err(SamplerError::Unavailable {
            facility: self.facility,
        })
    }

    fn memory(&self) -> Result<MemorySample, SamplerError> {
        Err(SamplerError::Unavailable {
            facility: self.facility,
        })
    }

    fn processes(&self, _limit: usize) -> Result<Vec<ProcessSample>, SamplerError> {
        Err(SamplerError::Unavailable {
            facility: self.facility,
        })
    }
}

/// The best sampler this build supports.
pub fn default_sampler() -> Box<dyn ResourceSampler> {
    #[cfg(feature = "sysinfo")]
    {
        Box::new(system::SysinfoSampler::new())
    }
    #[cfg(not(feature = "sysinfo"))]
    {
        Box::new(UnavailableSampler::default())
    }
}

#[cfg(feature = "sysinfo")]
pub use system::SysinfoSampler;

#[cfg(feature = "sysinfo")]
mod system {
    use super::{MemorySample, ProcessSample, ResourceSampler, SamplerError};
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use std::time::Duration;
    use sysinfo::{System, Users};

    const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

    pub struct SysinfoSampler {
        system: Mutex<System>,
    }

    impl Default for SysinfoSampler {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SysinfoSampler {
        pub fn new() -> Self {
            Self {
                system: Mutex::new(System::new()),
            }
        }

        fn system(&self) -> MutexGuard<'_, System> {
            self.system.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl ResourceSampler for SysinfoSampler {
        fn cpu(&self) -> Result<Vec<f32>, SamplerError> {
            let mut system = self.system();
            // Usage is a delta between two refreshes.
            system.refresh_cpu();
            std::thread::sleep(CPU_SAMPLE_INTERVAL.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
            system.refresh_cpu();
            Ok(system.cpus().iter().map(|cpu| cpu.cpu_usage()).collect())
        }

        fn memory(&self) -> Result<MemorySample, SamplerError> {
            let mut system = self.system();
            system.refresh_memory();
            let total_bytes = system.total_memory();
            let available_bytes = system.available_memory();
            let percent = if total_bytes == 0 {
                0.0
            } else {
                (total_bytes.saturating_sub(available_bytes)) as f64 / total_bytes as f64 * 100.0
            };
            Ok(MemorySample {
                total_bytes,
                used_bytes: system.used_memory(),
                available_bytes,
                percent,
            })
        }

        fn processes(&self, limit: usize) -> Result<Vec<ProcessSample>, SamplerError> {
            let mut system = self.system();
            system.refresh_processes();
            let users = Users::new_with_refreshed_list();

            let mut samples: Vec<ProcessSample> = system
                .processes()
                .iter()
                .map(|(pid, process)| ProcessSample {
                    pid: pid.as_u32(),
                    name: process.name().to_string(),
                    owner: process
                        .user_id()
                        .and_then(|uid| users.get_user_by_id(uid))
                        .map(|user| user.name().to_string()),
                })
                .collect();
            samples.sort_by_key(|sample| sample.pid);
            samples.truncate(limit);
            Ok(samples)
        }
    }
}
