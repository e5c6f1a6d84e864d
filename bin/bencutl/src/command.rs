use std::fs;
use std::io::{self, Error, ErrorKind, Read, Write};
use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Subcommand};

use bencode::{Decoder, Value};

use crate::config::DecodeArgs;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    #[command(about = "Print the structure of Bencode data")]
    Debug(Input),
    #[command(about = "Print Bencode data in a compact notation")]
    Show(Input),
    #[command(about = "Re-encode Bencode data in canonical form")]
    Encode(Input),
    #[command(about = "Check whether Bencode data is in canonical form")]
    Check(Input),
}

#[derive(Args, Debug)]
pub(crate) struct Input {
    #[arg(value_name = "PATH", help = "Read from a file instead of stdin")]
    path: Option<PathBuf>,

    #[command(flatten)]
    decode: DecodeArgs,
}

impl Command {
    pub(crate) fn run(&self) -> Result<(), Error> {
        let mut output = io::stdout().lock();
        match self {
            Self::Debug(input) => writeln!(output, "{:#?}", input.decode()?.1),
            Self::Show(input) => writeln!(output, "{}", input.decode()?.1),
            Self::Encode(input) => {
                output.write_all(&bencode::encode(&input.decode()?.1))?;
                output.flush()
            }
            Self::Check(input) => {
                let (data, value) = input.decode()?;
                ensure_canonical(&data, &value)?;
                writeln!(output, "ok")
            }
        }
    }
}

impl Input {
    fn read(&self) -> Result<Bytes, Error> {
        let data = match &self.path {
            Some(path) => fs::read(path)?,
            None => {
                let mut data = Vec::new();
                io::stdin().lock().read_to_end(&mut data)?;
                data
            }
        };
        tracing::debug!(path = ?self.path, size = data.len(), "read");
        Ok(data.into())
    }

    fn decode(&self) -> Result<(Bytes, Value), Error> {
        let config = self.decode.load()?;
        let data = self.read()?;
        let value = Decoder::new(data.clone(), config)
            .decode()
            .map_err(|error| Error::new(ErrorKind::InvalidData, error))?;
        Ok((data, value))
    }
}

fn ensure_canonical(data: &[u8], value: &Value) -> Result<(), Error> {
    let canonical = bencode::encode(value);
    if data == &canonical[..] {
        return Ok(());
    }
    let offset = data
        .iter()
        .zip(canonical.iter())
        .position(|(x, y)| x != y)
        .unwrap_or(data.len().min(canonical.len()));
    Err(Error::new(
        ErrorKind::InvalidData,
        format!("not in canonical form: first difference at offset {offset}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_canonical() {
        fn test(data: &[u8]) -> Result<(), String> {
            let value = bencode::decode_with(data, &bencode::DecodeConfig::lenient()).unwrap();
            super::ensure_canonical(data, &value).map_err(|error| error.to_string())
        }

        assert_eq!(test(b"d3:bar4:spam3:fooi42ee"), Ok(()));
        assert_eq!(test(b"li1ei2e3:fooe"), Ok(()));
        assert_eq!(
            test(b"d3:fooi42e3:bar4:spame"),
            Err("not in canonical form: first difference at offset 3".to_string()),
        );
        assert_eq!(
            test(b"i-0e"),
            Err("not in canonical form: first difference at offset 1".to_string()),
        );
        assert_eq!(
            test(b"d1:ai1e1:ai2ee"),
            Err("not in canonical form: first difference at offset 5".to_string()),
        );
    }
}
