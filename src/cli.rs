//! Command-line interface definition for StatefulChat
//!
//! The program is always interactive; these flags only adjust configuration.

use clap::Parser;

/// StatefulChat - chat with a language model and resume past conversations
#[derive(Parser, Debug, Clone)]
#[command(name = "statefulchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the model from config
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override the directory where conversations are saved
    #[arg(long)]
    pub logs_dir: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["statefulchat"]);
        assert_eq!(cli.config.as_deref(), Some("config/config.yaml"));
        assert!(!cli.verbose);
        assert!(cli.model.is_none());
        assert!(cli.logs_dir.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "statefulchat",
            "-v",
            "--model",
            "gpt-4o",
            "--logs-dir",
            "/tmp/chats",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.logs_dir.as_deref(), Some("/tmp/chats"));
    }
}
