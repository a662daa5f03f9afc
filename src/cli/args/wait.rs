//! Arguments for `release wait-for`

use std::time::Duration;

use clap::{ArgAction, Args};

use crate::release::UntilMode;

/// Parse a duration such as `30s`, `5m`, `2h` or a bare number of seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (number, unit_secs) = if let Some(stripped) = s.strip_suffix('h') {
        (stripped, 3600)
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 60)
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, 1)
    } else {
        (s, 1)
    };

    number
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit_secs))
        .map(Duration::from_secs)
        .ok_or_else(|| format!("Invalid duration '{}'. Use e.g. 30s, 5m or 1h", s))
}

/// Polling arguments for `release wait-for`.
#[derive(Args, Debug, Clone)]
pub struct WaitArgs {
    /// Suspension state to wait for (true or false)
    #[arg(
        long,
        short = 's',
        action = ArgAction::Set,
        default_value_t = false,
        value_name = "true|false"
    )]
    pub suspended: bool,

    /// Whether all or any of the releases must reach the state
    #[arg(long, value_enum, default_value = "all-match")]
    pub until: UntilMode,

    /// Time between polls (defaults to the config file value)
    #[arg(long, value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Maximum time to wait (defaults to the config file value)
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}

impl WaitArgs {
    /// Target value of the `suspended` property
    pub fn target_suspended(&self) -> bool {
        self.suspended
    }
}
