use std::fs::File;

use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::util::data_dir;

/// File-backed tracing. The alternate screen owns stdout, so everything
/// goes to `celebra.log` under the data directory. Filter via `CELEBRA_LOG`.
pub fn initialize_logging() -> color_eyre::Result<()> {
    let directory = data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = File::create(directory.join("celebra.log"))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(
            EnvFilter::try_from_env("CELEBRA_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        );

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
