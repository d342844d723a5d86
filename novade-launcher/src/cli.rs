use clap::Parser;
use std::path::PathBuf;

/// Full-screen application launcher for the Cutefish desktop.
#[derive(Parser, Debug, Default)]
#[command(name = "cutefish-launcher", version, about)]
pub struct Args {
    /// Show the launcher on first launch. Ignored if a launcher is already running.
    #[arg(long)]
    pub show: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_starts_hidden() {
        let args = Args::try_parse_from(["cutefish-launcher"]).unwrap();
        assert!(!args.show);
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, None);
    }

    #[test]
    fn all_flags_parse() {
        let args = Args::try_parse_from([
            "cutefish-launcher",
            "--show",
            "--config",
            "/tmp/launcher.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(args.show);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/launcher.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Args::try_parse_from(["cutefish-launcher", "--fullscreen"]).is_err());
    }
}
