use std::io::{self, Stderr};

use clap::{ArgAction, Args};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

#[derive(Args, Clone, Debug)]
pub(crate) struct TracingConfig {
    #[arg(
        long,
        short = 'v',
        action = ArgAction::Count,
        global = true,
        help = "Make log output more verbose (repeatable)",
    )]
    verbose: u8,
    #[arg(
        long,
        action = ArgAction::Count,
        global = true,
        help = "Make log output less verbose (repeatable)",
    )]
    silent: u8,

    #[arg(long, global = true, help = "Enable colored log output")]
    color: bool,
}

// Verbosity levels relative to the default, which logs warnings.  The decoder only emits `debug`
// and `trace` events, so `bencutl` is quiet unless asked otherwise.
const OFF: i16 = -2;
const ERROR: i16 = -1;
const WARN: i16 = 0;
const INFO: i16 = 1;
const DEBUG: i16 = 2;

const WRITER: fn() -> Stderr = io::stderr;

impl TracingConfig {
    pub(crate) fn init(&self) {
        let layer = fmt::layer()
            .compact()
            .with_ansi(self.color)
            .with_file(self.level() > DEBUG)
            .with_line_number(self.level() > DEBUG)
            .with_target(self.level() >= DEBUG)
            .with_writer(WRITER)
            .with_filter(self.env_filter());
        tracing_subscriber::registry().with(layer).init();
    }

    fn level(&self) -> i16 {
        i16::from(self.verbose) - i16::from(self.silent)
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level_filter().into())
            .from_env_lossy()
    }

    fn level_filter(&self) -> LevelFilter {
        match self.level() {
            level if level <= OFF => LevelFilter::OFF,
            ERROR => LevelFilter::ERROR,
            WARN => LevelFilter::WARN,
            INFO => LevelFilter::INFO,
            DEBUG => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Test {
        #[command(flatten)]
        tracing: TracingConfig,
    }

    #[test]
    fn level_filter() {
        fn test(args: &[&str], expect: LevelFilter) {
            let test = Test::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
                .unwrap();
            assert_eq!(test.tracing.level_filter(), expect);
        }

        test(&[], LevelFilter::WARN);
        test(&["-v"], LevelFilter::INFO);
        test(&["-vv"], LevelFilter::DEBUG);
        test(&["-vvv"], LevelFilter::TRACE);
        test(&["-vvvvvv"], LevelFilter::TRACE);
        test(&["--silent"], LevelFilter::ERROR);
        test(&["--silent", "--silent"], LevelFilter::OFF);
        test(&["--silent", "--silent", "--silent"], LevelFilter::OFF);
        test(&["-vv", "--silent"], LevelFilter::INFO);
    }
}
