use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use clap::ArgMatches;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

const LOG_NAMES: [&str; 6] = ["none", "error", "warn", "info", "debug", "trace"];

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "unknown log level '{}' (expected one of {})",
                s,
                LOG_NAMES.join(", ")
            )),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LOG_NAMES[*self as usize])
    }
}

impl LogLevel {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    // stderrlog verbosity: 0 => error, 1 => warn, ... 4 => trace
    pub fn verbosity(&self) -> usize {
        (*self as usize).saturating_sub(1)
    }
}

pub fn init_log(m: &ArgMatches) -> LogLevel {
    let verbose = m
        .get_one::<LogLevel>("loglevel")
        .copied()
        .unwrap_or(LogLevel::Info);

    let quiet = verbose.is_none() || m.get_flag("quiet");
    let ts = m
        .get_one::<stderrlog::Timestamp>("timestamp")
        .cloned()
        .unwrap_or(stderrlog::Timestamp::Off);

    stderrlog::new()
        .quiet(quiet)
        .verbosity(verbose.verbosity())
        .timestamp(ts)
        .init()
        .unwrap_or_else(|e| eprintln!("Could not initialize logging: {}", e));

    if quiet {
        LogLevel::None
    } else {
        verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_level() {
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn verbosity() {
        assert_eq!(LogLevel::Error.verbosity(), 0);
        assert_eq!(LogLevel::Info.verbosity(), 2);
        assert_eq!(LogLevel::Trace.verbosity(), 4);
        assert_eq!(LogLevel::Debug.to_string(), "debug");
    }
}
