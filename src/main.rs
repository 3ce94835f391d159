use clap::Parser;

use redpersona::cli::{self, Cli};
use redpersona::config::Config;
use redpersona::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    args.apply(&mut config);
    init_logging(config.output.json_log);

    tracing::info!("Starting redpersona v{}", env!("CARGO_PKG_VERSION"));
    cli::run(config).await
}
