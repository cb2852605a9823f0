use std::fs;
use std::io::{self, Read};

use openssh::AuthorizedKey;

use crate::error::{Error, Result};

/// Read input from a file or stdin
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Read the first key line, skipping blank lines and `#` comments the way
/// `authorized_keys` files are written.
pub(crate) fn read_key_line(file: Option<&str>) -> Result<String> {
    let contents = String::from_utf8(read_input(file)?)?;
    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput("no public key line found".to_string()))
}

/// Read and parse the first key line into its text envelope.
pub(crate) fn read_authorized_key(file: Option<&str>) -> Result<AuthorizedKey> {
    let line = read_key_line(file)?;
    Ok(line.parse()?)
}

/// Format binary data as a hexdump (`xxd` style, 16 bytes per line)
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    const BYTES_PER_LINE: usize = 16;
    let mut output = String::new();

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        output.push_str(&format!("{:08x}  ", offset * BYTES_PER_LINE));

        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(byte) => output.push_str(&format!("{:02x} ", byte)),
                None => output.push_str("   "),
            }
            if i == 7 {
                output.push(' ');
            }
        }

        output.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() || *byte == b' ' {
                output.push(*byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}

/// Format bytes as colon separated hex, `width` bytes per line, each line
/// prefixed with `indent`.
pub(crate) fn format_colon_hex(data: &[u8], width: usize, indent: &str) -> String {
    data.chunks(width)
        .map(|chunk| {
            let hex = chunk
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<String>>()
                .join(":");
            format!("{}{}", indent, hex)
        })
        .collect::<Vec<String>>()
        .join(":\n")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{format_colon_hex, format_hex_dump};

    #[rstest(
        input,
        expected,
        case(vec![], ""),
        case(vec![0x00, 0x9d], "  00:9d"),
        case(vec![0x01, 0x02, 0x03], "  01:02:\n  03")
    )]
    fn test_format_colon_hex(input: Vec<u8>, expected: &str) {
        assert_eq!(expected, format_colon_hex(&input, 2, "  "));
    }

    #[test]
    fn test_format_hex_dump() {
        let dump = format_hex_dump(b"\x00\x00\x00\x07ssh-rsa");
        assert_eq!(
            "00000000  00 00 00 07 73 73 68 2d  72 73 61                 |....ssh-rsa|\n",
            dump
        );
    }
}
