use std::fmt::Write;

use clap::Args;
use kagi::decoder::Decoder;
use serde::Serialize;
use ssh_rsa::{RsaPublicKey, SSH_RSA, SshRsaKey};
use tracing::debug;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::{format_colon_hex, format_hex_dump, read_authorized_key};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the public key file. If not specified, reads from stdin
    pub(crate) file: Option<String>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub(crate) output: OutputFormat,

    /// Show only the SHA256 fingerprint
    #[arg(long)]
    pub(crate) show_fingerprint: bool,

    /// Show HEX dump of the key blob
    #[arg(long)]
    pub(crate) hex: bool,
}

#[derive(Serialize)]
struct KeySummary<'a> {
    algorithm: &'static str,
    key_size: u64,
    #[serde(flatten)]
    key: &'a RsaPublicKey,
    comment: Option<&'a str>,
    fingerprint: String,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let line = read_authorized_key(config.file.as_deref())?;
    let key: RsaPublicKey = line.decode()?;
    let key = SshRsaKey {
        key,
        comment: line.comment().map(str::to_string),
    };
    debug!(bits = key.key.key_size(), "inspecting ssh-rsa key");

    if config.hex {
        // Dump the blob as supplied, not a canonical re-encoding.
        let blob: Vec<u8> = line.decode()?;
        print!("{}", format_hex_dump(&blob));
        return Ok(());
    }

    let fingerprint = key.key.fingerprint()?;
    if config.show_fingerprint {
        println!("{}", fingerprint);
        return Ok(());
    }

    let summary = KeySummary {
        algorithm: SSH_RSA,
        key_size: key.key.key_size(),
        key: &key.key,
        comment: key.comment.as_deref(),
        fingerprint,
    };

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Yaml => println!("{}", serde_yml::to_string(&summary)?),
        OutputFormat::Text => print!("{}", format_text(&summary)?),
    }

    Ok(())
}

fn format_text(summary: &KeySummary<'_>) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "RSA Public Key ({})", summary.algorithm)?;
    writeln!(output, "Key Size: {} bits", summary.key_size)?;

    let exponent = &summary.key.public_exponent;
    if exponent.bits() <= 64 {
        writeln!(output, "Public Exponent (e): {}", exponent)?;
    } else {
        writeln!(output, "Public Exponent (e): {} bits", exponent.bits())?;
    }

    writeln!(output, "Modulus (n):")?;
    writeln!(
        output,
        "{}",
        format_colon_hex(&summary.key.modulus.to_signed_bytes_be(), 15, "    ")
    )?;

    if let Some(comment) = summary.comment {
        writeln!(output, "Comment: {}", comment)?;
    }
    writeln!(output, "Fingerprint: {}", summary.fingerprint)?;

    Ok(output)
}
