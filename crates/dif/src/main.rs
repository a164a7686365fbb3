//! dif - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dif add 10 20` | Calculator invoker with explicit `a`, `b` and a resolved calculator |
//! | `dif todo add NAME [--seed NAME...]` | Validate, map and store a todo |
//! | `dif todo list [--seed NAME...]` | List todos |

use clap::Parser;
use dif::cli::{Cli, Reply, run};
use dif_infrastructure::ConfigLoader;
use dif_infrastructure::logging::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let reply = run(cli.command, config).await?;
    println!("{}", reply.to_json()?);

    Ok(match reply {
        Reply::Ok(_) => ExitCode::SUCCESS,
        Reply::Rejected(_) => ExitCode::FAILURE,
    })
}
