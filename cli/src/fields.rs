use std::fmt::Write;

use clap::Args;
use kagi::decoder::Decoder;
use wire::Reader;

use crate::error::Result;
use crate::utils::read_authorized_key;

const PREVIEW_BYTES: usize = 16;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the public key file. If not specified, reads from stdin
    file: Option<String>,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let line = read_authorized_key(config.file.as_deref())?;
    let blob: Vec<u8> = line.decode()?;
    print!("{}", list_fields(blob)?);
    Ok(())
}

// Fields are listed without interpretation, so this also works for key types
// other than ssh-rsa.
fn list_fields(blob: Vec<u8>) -> Result<String> {
    let mut reader = Reader::new(blob);
    let mut output = String::new();
    let mut index = 0;

    while !reader.is_empty() {
        let field = reader.read_field()?;
        write!(output, "[{}] length={}", index, field.len())?;
        if !field.is_empty() && field.iter().all(|b| b.is_ascii_graphic()) {
            write!(output, " \"{}\"", String::from_utf8_lossy(field))?;
        } else {
            let preview = field
                .iter()
                .take(PREVIEW_BYTES)
                .map(|b| format!("{:02x}", b))
                .collect::<String>();
            write!(output, " {}", preview)?;
            if field.len() > PREVIEW_BYTES {
                write!(output, "...")?;
            }
        }
        writeln!(output)?;
        index += 1;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use wire::Writer;

    use super::list_fields;
    use crate::error::Error;

    #[test]
    fn test_list_fields() {
        let mut writer = Writer::new();
        writer.write_string("ssh-rsa").unwrap();
        writer.write_field(&[0x01, 0x00, 0x01]).unwrap();
        writer.write_field(&[0xaa; 20]).unwrap();
        writer.write_field(&[]).unwrap();

        let output = list_fields(writer.into_bytes()).unwrap();
        assert_eq!(
            "[0] length=7 \"ssh-rsa\"\n\
             [1] length=3 010001\n\
             [2] length=20 aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa...\n\
             [3] length=0 \n",
            output
        );
    }

    #[rstest(
        input,
        case(vec![0x00, 0x00, 0x00, 0x09, 0x01]),
        case(vec![0x00, 0x00, 0x00, 0x01, 0x01, 0x00])
    )]
    fn test_list_fields_truncated(input: Vec<u8>) {
        assert!(matches!(list_fields(input), Err(Error::Wire(_))));
    }
}
