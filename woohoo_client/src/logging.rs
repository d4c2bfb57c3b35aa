use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::ClientError;

pub const DEFAULT_LOG_DIRECTIVES: &str = "woohoo_client=debug,info";

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_directives`.
pub fn init_logging(default_directives: &str) -> Result<(), ClientError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()?;

    Ok(())
}
