//! # Pitboss CLI
//!
//! Command-line shell around the back-office client core.
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP preview server
//! pitboss serve --listen 0.0.0.0:8080 --config pitboss.json
//!
//! # Render a detection box to PNG
//! pitboss overlay --width 640 --height 480 --box '{"x":10,"y":20,"width":100,"height":50}' --png box.png
//!
//! # Render a scan line
//! pitboss overlay --scan-line '[{"x":0,"y":240},{"x":640,"y":240}]' --png line.png
//!
//! # Show the display fragment for a scan
//! pitboss info 7501234567890 ean --reader USB
//!
//! # Resolve the landing route for a role set
//! pitboss landing extracciones admin
//!
//! # Sign in against the back-office API
//! pitboss login --username ana --password secret
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitboss::{
    AppConfig, PitbossError,
    auth::{AuthClient, AuthGateway},
    canvas::{RasterSurface, Surface, SurfaceRegistry},
    overlay::{DetectionBox, OverlayRenderer, ScanLine},
    server::MAX_PREVIEW_EDGE,
};

const SURFACE_ID: &str = "overlay";

/// Pitboss - Casino back-office client utility
#[derive(Parser, Debug)]
#[command(name = "pitboss")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP preview server
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        listen: Option<String>,
    },

    /// Render a detection box or scan line to PNG
    Overlay {
        /// Surface width in pixels (defaults to the configured fallback)
        #[arg(long)]
        width: Option<u32>,

        /// Surface height in pixels (defaults to the configured fallback)
        #[arg(long)]
        height: Option<u32>,

        /// Detection box as JSON: a point list or {x, y, width, height}
        #[arg(long = "box", value_name = "JSON", conflicts_with = "scan_line")]
        detection: Option<String>,

        /// Scan line as JSON: [{x, y}, {x, y}]
        #[arg(long, value_name = "JSON")]
        scan_line: Option<String>,

        /// Stroke colour (#RGB, #RRGGBB or #RRGGBBAA)
        #[arg(long)]
        color: Option<String>,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },

    /// Show the display fragment for a confirmed scan
    Info {
        /// Decoded barcode value
        code: String,

        /// Format key reported by the decoder (e.g. code_128, ean)
        format: String,

        /// Reader label
        #[arg(long, default_value = "Cámara")]
        reader: String,

        /// Print the HTML fragment instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Resolve the landing route for a set of roles
    Landing {
        /// Role tags
        roles: Vec<String>,
    },

    /// Sign in and print the landing route
    Login {
        /// API base URL (overrides the config file)
        #[arg(long)]
        api: Option<String>,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), PitbossError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            pitboss::server::serve(config).await?;
        }

        Commands::Overlay {
            width,
            height,
            detection,
            scan_line,
            color,
            png,
        } => {
            check_preview_edge("width", width)?;
            check_preview_edge("height", height)?;

            let renderer = OverlayRenderer::new(config.canvas_accessor());
            let surface = RasterSurface::new(0, 0)
                .with_displayed_size(width.unwrap_or(0), height.unwrap_or(0));
            let mut registry = SurfaceRegistry::new();
            registry.insert(SURFACE_ID, surface);

            if let Some(text) = scan_line {
                let line = ScanLine::from_json(&parse_json(&text)?);
                match color.as_deref() {
                    Some(color) => renderer.draw_scan_line_with_color(
                        &mut registry,
                        SURFACE_ID,
                        line.as_ref(),
                        color,
                    ),
                    None => renderer.draw_scan_line(&mut registry, SURFACE_ID, line.as_ref()),
                }
            } else {
                let detection = match detection {
                    Some(text) => DetectionBox::from_json(&parse_json(&text)?),
                    None => None,
                };
                match color.as_deref() {
                    Some(color) => renderer.draw_detection_box_with_color(
                        &mut registry,
                        SURFACE_ID,
                        detection.as_ref(),
                        color,
                    ),
                    None => {
                        renderer.draw_detection_box(&mut registry, SURFACE_ID, detection.as_ref())
                    }
                }
            }

            let surface = registry
                .get(SURFACE_ID)
                .ok_or_else(|| PitbossError::Image("overlay surface missing".to_string()))?;
            std::fs::write(&png, surface.to_png()?)?;

            let (w, h) = surface.size();
            println!(
                "Saved {}x{} overlay ({} painted pixels) to {}",
                w,
                h,
                surface.painted_pixels(),
                png.display()
            );
        }

        Commands::Info {
            code,
            format,
            reader,
            html,
        } => {
            let formatter = pitboss::barcode::BarcodeInfoFormatter::new(config.format_names());
            let fragment = formatter.format_info(&code, &format, &reader);
            if html {
                println!("{}", fragment.to_html());
            } else {
                println!("{}", fragment);
            }
        }

        Commands::Landing { roles } => {
            let table = config.role_table();
            println!("{}", table.default_dashboard(Some(&roles[..])));
        }

        Commands::Login {
            api,
            username,
            password,
        } => {
            if let Some(api) = api {
                config.api_base_url = api;
            }
            let client = AuthClient::new(&config.api_base_url)?;
            let mut gateway = AuthGateway::new(client, config.role_table());
            let route = gateway.sign_in(&username, &password).await?;

            if let Some(session) = gateway.sessions().current() {
                println!("Signed in as {}", session.user.username);
                println!("Roles: {}", session.roles.join(", "));
            }
            println!("Landing: {}", route);
        }
    }

    Ok(())
}

fn parse_json(text: &str) -> Result<serde_json::Value, PitbossError> {
    serde_json::from_str(text).map_err(|e| PitbossError::Config(format!("Invalid JSON: {}", e)))
}

/// Reject surface edges the preview server would also refuse.
fn check_preview_edge(name: &str, value: Option<u32>) -> Result<(), PitbossError> {
    match value {
        Some(v) if v > MAX_PREVIEW_EDGE => Err(PitbossError::Config(format!(
            "--{} must be at most {}, got {}",
            name, MAX_PREVIEW_EDGE, v
        ))),
        _ => Ok(()),
    }
}
