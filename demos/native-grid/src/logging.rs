use color_eyre::Result;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Environment variable consulted before `RUST_LOG`.
const LOG_ENV: &str = "GRIDGL_LOG";

/// Installs a console subscriber filtered by `GRIDGL_LOG`, then `RUST_LOG`,
/// defaulting to `info`.
pub fn init_logging() -> Result<()> {
    let env_var = match std::env::var(LOG_ENV) {
        Ok(_) => LOG_ENV,
        Err(_) => EnvFilter::DEFAULT_ENV,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(env_var)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(filter))
        .try_init()?;

    Ok(())
}
