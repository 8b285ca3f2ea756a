//! Form 16 extraction server — HTTP API over the extraction engine.
//!
//! Usage:
//!   FORM16_BIND=0.0.0.0:5000 form16-server
//!
//! Or with args:
//!   form16-server --bind 0.0.0.0:5000 --config /etc/form16/settings.json

use clap::Parser;
use form16_lib::{server, settings::Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "form16-server")]
#[command(version, about = "Form 16 PDF extraction HTTP API", long_about = None)]
struct Args {
    /// Settings file (default: FORM16_CONFIG or the user data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address, overrides FORM16_BIND and the settings file
    #[arg(long)]
    bind: Option<String>,

    /// Maximum upload size in bytes
    #[arg(long)]
    max_upload_bytes: Option<usize>,
}

#[tokio::main]
async fn main() {
    form16_lib::init_tracing();
    let args = Args::parse();

    let mut settings = match Settings::resolve(args.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }
    if let Some(max) = args.max_upload_bytes {
        settings.max_upload_bytes = max;
    }

    if let Err(e) = server::serve(settings).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
