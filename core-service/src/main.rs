//! ThermoSense CLI - train from the configured dataset and advise on one reading
//!
//! Usage: thermosense-core <battery_temp> <ambient_temp> <device_state> [hour]

use std::process::ExitCode;
use std::sync::Arc;

use thermosense_core::constants::{APP_NAME, APP_VERSION};
use thermosense_core::{
    AdvisoryService, EngineConfig, LocalClock, Observation, ScoringContext,
};

/// Reading used when no arguments are given
const DEMO_OBSERVATION: (f64, f64, &str) = (30.4, 24.2, "idle");

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let observation = match parse_args(std::env::args().skip(1).collect()) {
        Ok(obs) => obs.with_hour_from(&LocalClock),
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Usage: thermosense-core <battery_temp> <ambient_temp> <device_state> [hour]");
            return ExitCode::from(2);
        }
    };

    let config = EngineConfig::from_env();
    let context = match ScoringContext::from_config(&config) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = AdvisoryService::from_config(context, &config.enhance);
    let result = service.advisory(&observation).await;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize result: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Observation, String> {
    if args.is_empty() {
        let (bat, amb, state) = DEMO_OBSERVATION;
        return Ok(Observation::new(bat, amb, state));
    }

    if !(3..=4).contains(&args.len()) {
        return Err(format!("expected 3 or 4 arguments, got {}", args.len()));
    }

    let battery_temp: f64 = args[0]
        .parse()
        .map_err(|_| format!("invalid battery_temp: {}", args[0]))?;
    let ambient_temp: f64 = args[1]
        .parse()
        .map_err(|_| format!("invalid ambient_temp: {}", args[1]))?;

    let mut observation = Observation::new(battery_temp, ambient_temp, args[2].as_str());

    if let Some(raw) = args.get(3) {
        let hour: u8 = raw
            .parse()
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| format!("invalid hour: {}", raw))?;
        observation = observation.with_hour(hour);
    }

    Ok(observation)
}
