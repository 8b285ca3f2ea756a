pub mod error;
pub mod form16;
pub mod pdf_extractor;
pub mod server;
pub mod settings;

pub use error::{Form16Error, Result};
pub use form16::{extract, ExtractionResult};

/// Install the tracing subscriber shared by both binaries (`RUST_LOG` overrides)
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "form16_lib=info,form16_server=info,form16_cli=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
