use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::formatter::CustomFormatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Configure and initialize logging for the application.
///
/// `RUST_LOG` overrides the default of `info` for this crate and its binaries, `warn` elsewhere.
/// Safe to call more than once; only the first call installs a subscriber.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info,pacman=info,simulate=info", name = env!("CARGO_CRATE_NAME"))));

        let subscriber = tracing_subscriber::fmt()
            .with_ansi(true)
            .event_format(CustomFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Could not set global default subscriber: {e}");
        }
    });
}
