//! Roster API Server binary
//!
//! Upload page plus a single endpoint turning a booking export into the
//! roster archive.

use clap::Parser;
use class_roster::api::{run_api_server, server::ApiConfig};
use class_roster::config::RosterConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster-server")]
#[command(version)]
#[command(about = "Roster Server - upload a booking export, download the class rosters")]
#[command(long_about = r#"
Roster Server - upload a booking export, download the class rosters

Endpoints:
  - GET  /                - Upload page
  - POST /api/v1/rosters  - Multipart field 'file' (.xlsx), answers Rosters.zip
  - GET  /health          - Health check
  - GET  /version         - Server version info

Example usage:
  roster-server                           # Start on localhost:8080
  roster-server --host 0.0.0.0 --port 3000 --config roster.yaml

  curl -F file=@export.xlsx -o Rosters.zip http://localhost:8080/api/v1/rosters
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "ROSTER_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "ROSTER_PORT")]
    port: u16,

    /// Configuration file (YAML)
    #[arg(short, long, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let roster = RosterConfig::load_or_default(args.config.as_deref())?;

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config, roster).await
}
