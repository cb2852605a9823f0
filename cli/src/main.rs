use clap::{Parser, Subcommand};

mod decode;
mod error;
mod fields;
mod inspect;
mod logging;
mod output;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "kagi")]
#[command(about = "OpenSSH ssh-rsa public key toolkit", long_about = None)]
struct Cli {
    /// Log decoding steps to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an ssh-rsa public key and show its modulus and exponent
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
    /// Write the base64-decoded key blob to stdout
    Decode {
        #[command(flatten)]
        config: decode::Config,
    },
    /// List the length-prefixed fields of the key blob
    Fields {
        #[command(flatten)]
        config: fields::Config,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Inspect { config } => inspect::execute(config)?,
        Commands::Decode { config } => decode::execute(config)?,
        Commands::Fields { config } => fields::execute(config)?,
    }

    Ok(())
}
