use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// How long a dismissed reply sheet keeps its subject, in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub settle_ms: Option<u64>,

    /// Print state changes as JSON lines
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["replysheet"]);
        assert_eq!(cli.settle_ms, None);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["replysheet", "--settle-ms", "250", "--json"]);
        assert_eq!(cli.settle_ms, Some(250));
        assert!(cli.json);
    }
}
