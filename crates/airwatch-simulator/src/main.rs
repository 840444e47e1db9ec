//! Airwatch demo feed CLI
//!
//! Generates random air traffic and drives the server's feed-ingestion
//! endpoint with it.

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use airwatch_domain::Aircraft;
use airwatch_simulator::TrafficGenerator;

#[derive(Parser, Debug)]
#[command(name = "airwatch-simulator")]
#[command(about = "Feed demo air traffic into an airwatch server")]
struct Args {
    /// Number of demo aircraft
    #[arg(short, long, default_value = "20")]
    planes: usize,

    /// Server base URL
    #[arg(long, default_value = "http://localhost:8080")]
    server_url: String,

    /// Region center latitude
    #[arg(long, default_value = "48.2386")]
    center_lat: f64,

    /// Region center longitude
    #[arg(long, default_value = "14.1915")]
    center_lon: f64,

    /// Region radius in km
    #[arg(long, default_value = "100.0")]
    radius_km: f64,

    /// Tick interval in milliseconds
    #[arg(long, default_value = "1000")]
    tick_ms: u64,

    /// Total feed duration in ticks
    #[arg(long, default_value = "300")]
    duration: u32,

    /// Dry run (don't post to the server)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("airwatch_simulator=info".parse()?),
        )
        .init();

    let args = Args::parse();

    info!(
        "Starting demo feed: {} aircraft around ({}, {}), radius {} km",
        args.planes, args.center_lat, args.center_lon, args.radius_km
    );
    info!("Server: {}", args.server_url);
    info!("Tick: {}ms, Duration: {} ticks", args.tick_ms, args.duration);

    let mut generator = TrafficGenerator::new(args.center_lat, args.center_lon, args.radius_km);
    let mut fleet = generator.demo_fleet(args.planes);
    let client = Client::new();

    // Seed the registry
    for plane in &fleet {
        if !args.dry_run {
            if let Err(err) = post_aircraft(&client, &args.server_url, plane).await {
                warn!("Failed to post {}: {}", plane.callsign, err);
            }
        }
    }
    info!("Seeded {} aircraft", fleet.len());

    for tick in 0..args.duration {
        sleep(Duration::from_millis(args.tick_ms)).await;

        // Nudge one aircraft's course, as a live feed would
        if !fleet.is_empty() {
            let idx = tick as usize % fleet.len();
            generator.perturb(&mut fleet[idx]);
            info!(
                "Tick {}/{} | {} now heading {:.0}° at {:.0} kn",
                tick + 1,
                args.duration,
                fleet[idx].callsign,
                fleet[idx].heading_deg,
                fleet[idx].speed_kn
            );
            if !args.dry_run {
                if let Err(err) = post_aircraft(&client, &args.server_url, &fleet[idx]).await {
                    warn!("Failed to post {}: {}", fleet[idx].callsign, err);
                }
            }
        }

        // Rotate traffic every 30 ticks: one aircraft leaves coverage and a
        // replacement arrives
        if tick % 30 == 29 && !fleet.is_empty() {
            let retired = fleet.remove(0);
            generator.retire(&retired.callsign);
            info!("{} left coverage", retired.callsign);
            if !args.dry_run {
                if let Err(err) = remove_aircraft(&client, &args.server_url, &retired.callsign).await
                {
                    warn!("Failed to remove {}: {}", retired.callsign, err);
                }
            }

            let replacement = generator.spawn_aircraft();
            info!("{} entered coverage", replacement.callsign);
            if !args.dry_run {
                if let Err(err) = post_aircraft(&client, &args.server_url, &replacement).await {
                    warn!("Failed to post {}: {}", replacement.callsign, err);
                }
            }
            fleet.push(replacement);
        }
    }

    info!("Demo feed complete");
    Ok(())
}

/// Post one aircraft report to the feed endpoint.
async fn post_aircraft(client: &Client, base_url: &str, aircraft: &Aircraft) -> Result<()> {
    let response = client
        .post(format!("{base_url}/feed/aircraft"))
        .json(aircraft)
        .send()
        .await?;

    if !response.status().is_success() {
        warn!("Feed endpoint returned status: {}", response.status());
    }

    Ok(())
}

/// Remove an aircraft from coverage.
async fn remove_aircraft(client: &Client, base_url: &str, callsign: &str) -> Result<()> {
    let response = client
        .delete(format!("{base_url}/feed/aircraft/{callsign}"))
        .send()
        .await?;

    if !response.status().is_success() {
        warn!("Feed endpoint returned status: {}", response.status());
    }

    Ok(())
}
