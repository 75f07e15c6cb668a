mod feeds;
mod geo;
mod scene;
mod view;
mod web;

use clap::{Parser, Subcommand};
use serde_json::json;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::feeds::{BackendClient, DEFAULT_BACKEND};
use crate::geo::{acquire_position, FixedLocator, GeoPosition};
use crate::scene::{project, Category, SceneState};
use crate::view::{lock_view, Hud, Scanner, ViewState, FOCUS_HOLD};

#[derive(Parser)]
#[command(name = "sat-globe")]
#[command(about = "Satellites and near-earth objects around your location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feed proxy
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
    /// Scan the sky once and animate the globe headlessly
    Scan {
        #[arg(long, default_value = DEFAULT_BACKEND)]
        backend: String,
        /// Observer position as "lat, lng"; the fallback is used when absent
        #[arg(long, allow_hyphen_values = true)]
        position: Option<String>,
        /// Focus hold after the scan settles [default: 2s]
        #[arg(long, value_parser = humantime::parse_duration)]
        hold: Option<Duration>,
        #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
        timeout: Duration,
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Dump the scanned records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the scene position of a coordinate
    Project {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Altitude (satellite) or miss distance (asteroid) in km
        #[arg(long, default_value_t = 0.0)]
        distance: f64,
        /// satellite, asteroid or user; anything else sits on the surface
        #[arg(long, default_value = "surface")]
        category: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config).await,
        Commands::Scan {
            backend,
            position,
            hold,
            timeout,
            fps,
            json,
        } => {
            let hold = hold.unwrap_or(FOCUS_HOLD);
            scan(&backend, position.as_deref(), hold, timeout, fps, json).await
        }
        Commands::Project {
            lat,
            lng,
            distance,
            category,
        } => project_point(lat, lng, distance, Category::from_label(&category)),
    }
}

async fn serve(path: &str) -> ExitCode {
    let config = match web::Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn scan(
    backend: &str,
    coordinates: Option<&str>,
    hold: Duration,
    timeout: Duration,
    fps: u32,
    dump_json: bool,
) -> ExitCode {
    let requested = coordinates.and_then(|c| match GeoPosition::from_coordinates(c) {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("Ignoring supplied position: {}", e);
            None
        }
    });
    let position = acquire_position(&FixedLocator::new(requested));

    let view = Arc::new(Mutex::new(ViewState::with_position(position)));
    let mut scanner = Scanner::new(BackendClient::new(backend, timeout), view.clone(), hold);
    let mut scene = SceneState::default();

    let frame = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut ticker = tokio::time::interval(frame);
    let mut frames = 0u64;

    let summary = {
        let scan = scanner.scan();
        tokio::pin!(scan);
        loop {
            tokio::select! {
                result = &mut scan => break result,
                _ = ticker.tick() => {
                    scene.tick(frame.as_secs_f64(), &lock_view(&view));
                    frames += 1;
                }
            }
        }
    };

    let summary = match summary {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Scan error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // keep animating until the focus hold runs out
    while lock_view(&view).focus() {
        ticker.tick().await;
        scene.tick(frame.as_secs_f64(), &lock_view(&view));
        frames += 1;
    }
    scanner.shutdown().await;

    let view = lock_view(&view).clone();
    print!("{}", Hud::from_view(&view));
    let camera = scene.camera.position;
    println!(
        "camera ({:.3}, {:.3}, {:.3})  mode {}  globe yaw {:.4} rad  {} frames",
        camera.x,
        camera.y,
        camera.z,
        scene.controller.mode(),
        scene.globe_yaw,
        frames
    );
    println!(
        "markers: {} satellites, {} asteroids",
        scene.count(Category::Satellite),
        scene.count(Category::Asteroid)
    );
    if let Some((marker, distance)) = scene.nearest_marker() {
        println!("nearest to camera: {} ({:.3} units)", marker.label, distance);
    }

    if dump_json {
        let records = json!({
            "position": view.position(),
            "satellites": view.satellites(),
            "asteroids": view.asteroids(),
        });
        match serde_json::to_string_pretty(&records) {
            Ok(text) => println!("{}", text),
            Err(e) => log::error!("Failed to encode records: {}", e),
        }
    }

    if summary.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn project_point(lat: f64, lng: f64, distance: f64, category: Category) -> ExitCode {
    if let Err(e) = GeoPosition::new(lat, lng) {
        eprintln!("Invalid coordinates: {}", e);
        return ExitCode::FAILURE;
    }
    let v = project(lat, lng, distance, category);
    println!(
        "{} ({:.6}, {:.6}, {:.6})  r={:.6}",
        category,
        v.x,
        v.y,
        v.z,
        v.length()
    );
    ExitCode::SUCCESS
}
