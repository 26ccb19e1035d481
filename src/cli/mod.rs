//! CLI module for the tutor.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tutor - subject-routing study assistant
///
/// Routes a student's question to a math, physics or chemistry agent (or a
/// general tutor), augments the prompt with calculator, unit, constant,
/// formula and periodic-table data, and answers with a language model.
#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question and get an answer from the matching subject agent
    Ask {
        /// The question to ask
        question: String,

        /// Print the full routing result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session; every question is routed on its own
    Chat,

    /// Show which subject a question would be routed to
    Classify {
        /// The question to classify
        question: String,
    },

    /// Evaluate an arithmetic expression with the safe calculator
    Calc {
        /// Expression, e.g. "2 ** 0.5" or "15% of 80"
        expression: String,
    },

    /// Convert a value between two units
    Convert {
        /// Value to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Unit to convert from (e.g. km, celsius, mph)
        from: String,

        /// Unit to convert to
        to: String,
    },

    /// Look up an element by name or symbol
    Element {
        /// Element name or symbol
        name: String,
    },

    /// Look up a physical constant by key, symbol or search term
    Constant {
        /// Key (speed_of_light), symbol (c) or search term (planck)
        name: String,
    },

    /// Search the physics formula catalog
    Formula {
        /// Search words, e.g. "kinetic energy"
        query: String,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration and API access
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_json() {
        let cli = Cli::try_parse_from(["tutor", "-vv", "ask", "What is 2 + 2?", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask { question, json } => {
                assert_eq!(question, "What is 2 + 2?");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert_negative_value() {
        let cli = Cli::try_parse_from(["tutor", "convert", "-40", "c", "f"]).unwrap();
        match cli.command {
            Commands::Convert { value, from, to } => {
                assert_eq!(value, -40.0);
                assert_eq!(from, "c");
                assert_eq!(to, "f");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_defaults_to_config() {
        let cli = Cli::try_parse_from(["tutor", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { host: None, port: None }));
    }
}
