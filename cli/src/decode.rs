use std::io::{self, Write};

use clap::Args;
use kagi::decoder::Decoder;
use tracing::debug;

use crate::error::Result;
use crate::utils::{format_hex_dump, read_authorized_key};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the public key file. If not specified, reads from stdin
    file: Option<String>,

    /// Output as hexadecimal dump instead of binary
    #[arg(long)]
    hex: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let line = read_authorized_key(config.file.as_deref())?;
    let blob: Vec<u8> = line.decode()?;
    debug!(algorithm = line.algorithm(), bytes = blob.len(), "decoded key blob");

    if config.hex {
        print!("{}", format_hex_dump(&blob));
    } else {
        io::stdout().write_all(&blob)?;
    }

    Ok(())
}
