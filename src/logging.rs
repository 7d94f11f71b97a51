//! Log subscriber for native hosts and the `walletkit` CLI.
//!
//! `RUST_LOG` wins when set. Otherwise only this crate logs, at `info`
//! (`debug` when verbose). `WALLETKIT_LOG_FORMAT` picks the line format.

use tracing_subscriber::{fmt, EnvFilter};

const FORMAT_VAR: &str = "WALLETKIT_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to pretty
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" | "1" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }

    fn from_env() -> Self {
        std::env::var(FORMAT_VAR).map(|v| Self::parse(&v)).unwrap_or_default()
    }
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,stellar_wallets_kit=debug,walletkit=debug"
    } else {
        "warn,stellar_wallets_kit=info,walletkit=info"
    }
}

/// Install the stderr subscriber; a second call is a no-op.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let builder = fmt::Subscriber::builder().with_env_filter(filter).with_writer(std::io::stderr);

    let _ = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("1"), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("fancy"), LogFormat::Pretty);
    }

    #[test]
    fn verbose_raises_crate_level() {
        assert!(default_directives(true).contains("stellar_wallets_kit=debug"));
        assert!(default_directives(false).contains("stellar_wallets_kit=info"));
    }
}
