use clap::Parser;
use huddle::core::config::{self, CliOverrides, HuddleConfig};
use huddle::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "huddle", about = "Terminal meeting assistant")]
struct Args {
    /// Backend base URL (overrides config file and HUDDLE_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Session id sent with every request (defaults to a fresh UUID)
    #[arg(long)]
    session_id: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to huddle.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("huddle.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        HuddleConfig::default()
    });
    let cli = CliOverrides {
        backend_url: args.backend_url,
        session_id: args.session_id,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Huddle starting up against {}", resolved.backend_url);

    tui::run(resolved)
}
