use std::fs;
use std::io::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use bencode::{DecodeConfig, IntegerPolicy, KeyPolicy};

#[derive(Args, Clone, Debug)]
pub(crate) struct DecodeArgs {
    #[arg(long, value_name = "PATH", help = "Load decoder settings from a YAML file")]
    config: Option<PathBuf>,

    #[arg(long, conflicts_with = "lenient", help = "Accept only canonical input")]
    strict: bool,
    #[arg(long, help = "Accept non-canonical integers and duplicate dictionary keys")]
    lenient: bool,

    #[arg(long, value_name = "DEPTH", help = "Limit the nesting of lists and dictionaries")]
    max_depth: Option<usize>,
    #[arg(long, value_enum, help = "Set how integers are checked")]
    integers: Option<IntegerArg>,
    #[arg(long, value_enum, help = "Set how dictionary keys are checked")]
    keys: Option<KeyArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IntegerArg {
    Canonical,
    Lenient,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KeyArg {
    LastWins,
    Unique,
    Sorted,
}

impl From<IntegerArg> for IntegerPolicy {
    fn from(arg: IntegerArg) -> Self {
        match arg {
            IntegerArg::Canonical => Self::Canonical,
            IntegerArg::Lenient => Self::Lenient,
        }
    }
}

impl From<KeyArg> for KeyPolicy {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::LastWins => Self::LastWins,
            KeyArg::Unique => Self::Unique,
            KeyArg::Sorted => Self::Sorted,
        }
    }
}

impl DecodeArgs {
    /// Resolves the decoder settings.
    ///
    /// Precedence, lowest first: defaults, the config file, a preset flag, individual flags.
    pub(crate) fn load(&self) -> Result<DecodeConfig, Error> {
        let mut config = match &self.config {
            Some(path) => {
                let config = parse_config(&fs::read_to_string(path)?)?;
                tracing::debug!(path = %path.display(), ?config, "load config");
                config
            }
            None => DecodeConfig::default(),
        };

        if self.strict {
            config = DecodeConfig::strict().with_max_depth(config.max_depth);
        }
        if self.lenient {
            config = DecodeConfig::lenient().with_max_depth(config.max_depth);
        }

        if let Some(max_depth) = self.max_depth {
            config = config.with_max_depth(max_depth);
        }
        if let Some(integers) = self.integers {
            config = config.with_integers(integers.into());
        }
        if let Some(keys) = self.keys {
            config = config.with_keys(keys.into());
        }
        Ok(config)
    }
}

fn parse_config(config: &str) -> Result<DecodeConfig, Error> {
    // An empty file is a null document, which we treat as "all defaults".
    if config.trim().is_empty() {
        return Ok(DecodeConfig::default());
    }
    serde_yaml::from_str(config).map_err(Error::other)
}
