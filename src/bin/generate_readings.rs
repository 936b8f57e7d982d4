//! Synthetic reading generator for local development and demos.
//!
//! Posts one random reading per interval to the telemetry API, forever.
//! Failures are logged and the loop keeps going — re-sending on the next
//! tick is the only retry this client needs.
//!
//! Usage:
//!   BASE_BACKEND_URL=http://localhost:8000 cargo run --bin generate_readings

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use serde_json::json;
use tokio::time;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let base_url = std::env::var("BASE_BACKEND_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_owned());
    let interval_secs: u64 = std::env::var("GENERATOR_INTERVAL_SECS")
        .unwrap_or_else(|_| "1".to_owned())
        .parse()?;

    let client = reqwest::Client::new();
    let mut ticker = time::interval(Duration::from_secs(interval_secs));
    info!(base_url = %base_url, interval_secs, "Reading generator started");

    loop {
        ticker.tick().await;

        let payload = {
            let mut rng = rand::rng();
            json!({
                "name": format!("Sensor-{}", rng.random_range(1..=5)),
                "value": (rng.random_range(0.0..100.0) * 100.0_f64).round() / 100.0,
                "timestamp": Utc::now(),
            })
        };

        match client
            .post(format!("{base_url}/sensors"))
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                info!(status = %resp.status(), "Reading created");
            }
            Ok(resp) => {
                error!(status = %resp.status(), "Reading rejected by the API");
            }
            Err(e) => {
                error!(error = %e, "Failed to reach the API");
            }
        }
    }
}
