//! Slashroute CLI
//!
//! Replays recorded interaction payloads through a demo handler tree and
//! prints whatever the handlers send back.
//!
//! ```bash
//! slashroute replay payload.json --guild 42
//! RUST_LOG=debug slashroute replay - < payload.json
//! slashroute commands
//! ```

mod args;
mod console;
mod demo;
mod router;

use clap::Parser;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await
}
