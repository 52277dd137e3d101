use sysinfo::System;

use crate::config::PipelineConfig;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone)]
pub struct HostInfo {
    pub cpu_cores: usize,
    pub total_memory_gb: f64,
    pub available_memory_gb: f64,
}

impl HostInfo {
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        let cpu_cores = match sys.cpus().len() {
            0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
            n => n,
        };

        HostInfo {
            cpu_cores,
            total_memory_gb: sys.total_memory() as f64 / BYTES_PER_GIB,
            available_memory_gb: sys.available_memory() as f64 / BYTES_PER_GIB,
        }
    }
}

/// One-shot host report printed before any figure is generated.
pub fn report(config: &PipelineConfig) -> HostInfo {
    let host = HostInfo::collect();
    println!("Number of CPU cores: {}", host.cpu_cores);
    println!("Total RAM: {:.2} GB", host.total_memory_gb);
    println!("Available RAM: {:.2} GB", host.available_memory_gb);
    println!("Working Directory: {}", config.root.display());
    println!("Data Directory: {}", config.data_dir.display());
    host
}
