use anyhow::Result;
use canetrack::commands::Cli;
use canetrack::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("canetrack=debug")))
            .with_target(false)
            .init();
    }

    Cli::run()
}
