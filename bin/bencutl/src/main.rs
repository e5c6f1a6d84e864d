mod command;
mod config;
mod tracing;

use std::io::Error;

use clap::Parser;

use crate::command::Command;
use crate::tracing::TracingConfig;

#[derive(Debug, Parser)]
#[command(version, about = "Inspect and canonicalize Bencode data")]
struct Bencutl {
    #[command(flatten, next_display_order = 100)]
    tracing: TracingConfig,

    #[command(subcommand, next_display_order = 0)]
    command: Command,
}

fn main() -> Result<(), Error> {
    let bencutl = Bencutl::parse();
    bencutl.tracing.init();
    bencutl.command.run()
}
