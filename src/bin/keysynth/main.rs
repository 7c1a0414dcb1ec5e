//! keysynth - play the computer keyboard like a piano
//!
//! Run with: cargo run
//! Logging goes to stderr, filtered by `KEYSYNTH_LOG` (default `warn`).
//! `KEYSYNTH_HOLD_MS` overrides how long a key counts as down on terminals
//! that do not report key releases.

mod app;
mod ui;

use std::time::Duration;

use app::KeySynth;
use keysynth::{io::keyboard::DEFAULT_HOLD_TIMEOUT, SynthConfig};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_env("KEYSYNTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    KeySynth::new()
        .config(SynthConfig::default())
        .channel(1)
        .hold_timeout(hold_timeout_from_env())
        .run()
}

fn hold_timeout_from_env() -> Duration {
    parse_hold_ms(std::env::var("KEYSYNTH_HOLD_MS").ok().as_deref())
}

/// Positive millisecond count, or the default when unset or malformed.
fn parse_hold_ms(raw: Option<&str>) -> Duration {
    let Some(raw) = raw else {
        return DEFAULT_HOLD_TIMEOUT;
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Duration::from_millis(ms),
        _ => {
            tracing::warn!(value = raw, "ignoring invalid KEYSYNTH_HOLD_MS");
            DEFAULT_HOLD_TIMEOUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_ms_overrides_default() {
        assert_eq!(parse_hold_ms(Some("250")), Duration::from_millis(250));
        assert_eq!(parse_hold_ms(Some(" 900 ")), Duration::from_millis(900));
    }

    #[test]
    fn bad_hold_ms_falls_back() {
        assert_eq!(parse_hold_ms(None), DEFAULT_HOLD_TIMEOUT);
        assert_eq!(parse_hold_ms(Some("0")), DEFAULT_HOLD_TIMEOUT);
        assert_eq!(parse_hold_ms(Some("soon")), DEFAULT_HOLD_TIMEOUT);
    }
}
