use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "user-item bias scorer")]
pub struct Cli {
    /// SQLite database path (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Damping applied to item mean offsets
    #[arg(long, global = true)]
    pub damping: Option<f64>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Replace the stored ratings with the contents of a JSON file
    Import {
        /// JSON array of rating events
        path: PathBuf,
    },
    /// Build the bias model and score items for a user
    Score {
        #[arg(short, long)]
        user: i64,
        /// Items to score, comma separated (defaults to every rated item)
        #[arg(short, long, value_delimiter = ',')]
        items: Vec<i64>,
        /// Print only the N best items
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.database {
            config.storage.database_path = path.clone();
        }
        if let Some(damping) = self.damping {
            config.model.damping = damping;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_command() {
        let cli = Cli::parse_from([
            "bias-scorer", "--damping", "2.5", "score", "--user", "7", "--items", "1,2,3", "-n", "2",
        ]);

        assert_eq!(
            cli.command,
            Command::Score {
                user: 7,
                items: vec![1, 2, 3],
                top: Some(2),
            }
        );

        let mut config = AppConfig::new();
        cli.apply_overrides(&mut config);
        assert_eq!(config.model.damping, 2.5);
    }

    #[test]
    fn database_override() {
        let cli = Cli::parse_from(["bias-scorer", "import", "ratings.json", "--database", "/tmp/x.db"]);

        let mut config = AppConfig::new();
        cli.apply_overrides(&mut config);
        assert_eq!(config.storage.database_path, "/tmp/x.db");
        assert_eq!(cli.command, Command::Import { path: "ratings.json".into() });
    }
}
