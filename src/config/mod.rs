//! Configuration management

use super::types::SyncError;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "updates.json";

/// Default deployment root, a sibling of the development tree
pub const DEFAULT_DESTINATION: &str = "../coolj";

/// Default listen address for `fileweb`
pub const DEFAULT_SERVE_ADDR: &str = "0.0.0.0:8080";

/// Command-line arguments for `coolju`
#[derive(Debug, Parser)]
#[command(name = "coolju", version)]
#[command(about = "Copy the files listed in a release manifest into a deployment tree")]
pub struct Cli {
    /// Manifest listing the files and directories to update
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MANIFEST)]
    pub list: PathBuf,

    /// Source root (relative or absolute)
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub from: PathBuf,

    /// Destination root (relative or absolute)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DESTINATION)]
    pub to: PathBuf,

    /// Print every file actually copied as `source -> destination`
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command-line arguments for `fileweb`
#[derive(Debug, Parser)]
#[command(name = "fileweb", version)]
#[command(about = "Serve a directory over HTTP for local testing")]
pub struct ServeCli {
    /// Directory to serve
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Listen address
    #[arg(long, default_value = DEFAULT_SERVE_ADDR)]
    pub addr: SocketAddr,
}

/// Run configuration, built once at startup and passed down by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Manifest file
    pub manifest_path: PathBuf,

    /// Source root
    pub source: PathBuf,

    /// Destination root
    pub destination: PathBuf,

    /// Print copied pairs
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            source: PathBuf::from("."),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            verbose: false,
        }
    }
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.manifest_path.as_os_str().is_empty() {
            return Err(SyncError::Config(
                "Manifest path must not be empty".to_string(),
            ));
        }

        if self.source == self.destination {
            return Err(SyncError::Config(format!(
                "Source and destination cannot be the same: {:?}",
                self.source
            )));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let config = Config {
            manifest_path: cli.list,
            source: cli.from,
            destination: cli.to,
            verbose: cli.verbose,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["coolju"]).expect("parse defaults");
        let config = Config::try_from(cli).expect("valid config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "coolju", "--list", "rel.json", "--from", "/dev/src", "--to", "/srv/www", "-v",
        ])
        .expect("parse flags");
        let config = Config::try_from(cli).expect("valid config");

        assert_eq!(config.manifest_path, PathBuf::from("rel.json"));
        assert_eq!(config.source, PathBuf::from("/dev/src"));
        assert_eq!(config.destination, PathBuf::from("/srv/www"));
        assert!(config.verbose);
    }

    #[test]
    fn test_same_source_and_destination_rejected() {
        let cli = Cli::try_parse_from(["coolju", "--from", "site", "--to", "site"])
            .expect("parse flags");
        let err = Config::try_from(cli).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_empty_manifest_path_rejected() {
        let config = Config {
            manifest_path: PathBuf::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serve_cli_defaults_and_root() {
        let cli = ServeCli::try_parse_from(["fileweb"]).expect("parse defaults");
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.addr.port(), 8080);

        let cli = ServeCli::try_parse_from(["fileweb", "public"]).expect("parse root");
        assert_eq!(cli.root, PathBuf::from("public"));
    }
}
