//! `university serve`: run the gRPC server in the foreground.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use university_server::{config::parse_listen_addr, start_blocking, ServerConfig};

/// Flags override `UNIVERSITY_LISTEN_ADDR` / `UNIVERSITY_SEED`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Socket address to listen on (default 0.0.0.0:50051).
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Roster YAML file to load before accepting calls.
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,
}

impl ServeArgs {
    pub fn run(self) -> Result<()> {
        let mut config = ServerConfig::from_env().context("invalid server environment")?;
        if let Some(listen) = self.listen.as_deref() {
            config.listen_addr = parse_listen_addr(listen)?;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        start_blocking(config).context("server exited with error")
    }
}
