//! Host Sensor Snapshot
//!
//! Best-effort thermal and load readings for the local machine. Every probe
//! may come back empty; nothing here returns an error.
//!
//! - CPU load, memory, CPU temperature: `sysinfo`
//! - Battery (Linux): `/sys/class/power_supply/BAT*/{capacity,status,temp}`

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sysinfo::{Components, System, MINIMUM_CPU_UPDATE_INTERVAL};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Sampling window for CPU load
const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub battery_percent: Option<f32>,
    pub charging: Option<bool>,
    pub battery_temp: Option<f32>,
    pub cpu_temp: Option<f32>,
    /// Only reported on macOS; always absent here
    pub thermal_pressure: Option<String>,
    pub cpu_load: f32,
    pub mem_percent: f32,
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatteryReading {
    pub percent: Option<f32>,
    pub charging: Option<bool>,
    pub temp: Option<f32>,
}

/// Take a snapshot. Blocks for the CPU sampling window.
pub fn collect() -> SystemStats {
    let mut sys = System::new();
    sys.refresh_cpu();
    std::thread::sleep(CPU_SAMPLE_WINDOW.max(MINIMUM_CPU_UPDATE_INTERVAL));
    sys.refresh_cpu();
    sys.refresh_memory();

    let cpu_load = round1(sys.global_cpu_info().cpu_usage());
    let mem_percent = if sys.total_memory() > 0 {
        round1((sys.used_memory() as f64 / sys.total_memory() as f64 * 100.0) as f32)
    } else {
        0.0
    };

    let battery = if cfg!(target_os = "linux") {
        read_power_supply(Path::new(POWER_SUPPLY_DIR))
    } else {
        BatteryReading::default()
    };

    SystemStats {
        battery_percent: battery.percent,
        charging: battery.charging,
        battery_temp: battery.temp,
        cpu_temp: cpu_temperature(),
        thermal_pressure: None,
        cpu_load,
        mem_percent,
        platform: platform_name(std::env::consts::OS).to_string(),
    }
}

/// First package / core-0 sensor reading
fn cpu_temperature() -> Option<f32> {
    let components = Components::new_with_refreshed_list();
    components
        .iter()
        .find(|c| {
            let label = c.label().to_lowercase();
            (label.contains("package") || label.contains("core 0")) && c.temperature() > 0.0
        })
        .map(|c| round1(c.temperature()))
}

/// Read the first `BAT*` entry under a power-supply directory
pub fn read_power_supply(dir: &Path) -> BatteryReading {
    let Ok(entries) = fs::read_dir(dir) else {
        return BatteryReading::default();
    };

    let mut batteries: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with("BAT"))
        })
        .collect();
    batteries.sort();

    let Some(bat) = batteries.first() else {
        return BatteryReading::default();
    };

    let read = |name: &str| fs::read_to_string(bat.join(name)).ok().map(|s| s.trim().to_string());

    BatteryReading {
        percent: read("capacity").and_then(|s| s.parse::<f32>().ok()),
        charging: read("status").and_then(|s| parse_charging(&s)),
        // milli-°C
        temp: read("temp")
            .and_then(|s| s.parse::<i64>().ok())
            .map(|t| round1(t as f32 / 1000.0)),
    }
}

/// Plugged in = anything but discharging
fn parse_charging(status: &str) -> Option<bool> {
    match status.to_ascii_lowercase().as_str() {
        "charging" | "full" | "not charging" => Some(true),
        "discharging" => Some(false),
        _ => None,
    }
}

/// Kernel-style OS name, as clients expect ("darwin" rather than "macos")
fn platform_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
