//! CLI command definitions

use clap::{Parser, Subcommand};
use learnloop_tutor::Level;
use std::path::PathBuf;

/// CLI arguments for learnloop
#[derive(Parser, Debug)]
#[command(name = "learnloop")]
#[command(author, version, about = "LearnLoop - adaptive learning platform")]
#[command(long_about = r#"
LearnLoop answers questions with a templated response, and checks anything that looks like math
with an exact computer algebra engine.

Questions starting with `simplify`, `derive` or `integrate` run that command on the expression
that follows. The calculus commands accept a variable after a comma: `derive x*y, y`.

Configuration is merged from (lowest to highest priority):
1. built-in defaults          host 0.0.0.0, port 7860, level Beginner
2. ./learnloop.toml           or the file given with --config
3. LEARNLOOP_* variables      LEARNLOOP_HOST, LEARNLOOP_PORT, LEARNLOOP_DEFAULT_LEVEL
4. PORT                       the listening port
5. command line flags

Example:
  learnloop serve --port 8080
  learnloop ask "simplify (x^2 - 1)/(x - 1)"
  learnloop repl --level advanced
"#)]
pub struct Cli {
    /// What to run; serves the form when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// Subcommands of learnloop
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the question form over HTTP
    Serve {
        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer a single question and exit
    Ask {
        /// The question to answer
        question: String,

        /// Difficulty level; defaults to the configured level
        #[arg(short, long)]
        level: Option<Level>,

        /// Print the concise body instead of the step-by-step outline
        #[arg(long)]
        concise: bool,
    },

    /// Ask questions interactively
    Repl {
        /// Difficulty level; defaults to the configured level
        #[arg(short, long)]
        level: Option<Level>,

        /// Print the concise body instead of the step-by-step outline
        #[arg(long)]
        concise: bool,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn serve_is_optional() {
        let cli = Cli::parse_from(["learnloop", "-vv"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn ask_with_level() {
        let cli = Cli::parse_from(["learnloop", "ask", "2+2", "--level", "advanced", "--concise"]);
        assert_eq!(cli.command, Some(Command::Ask {
            question: "2+2".to_string(),
            level: Some(Level::Advanced),
            concise: true,
        }));
    }

    #[test]
    fn serve_flags() {
        let cli = Cli::parse_from(["learnloop", "serve", "--port", "8080", "--config", "x.toml"]);
        assert_eq!(cli.command, Some(Command::Serve { host: None, port: Some(8080) }));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(Cli::try_parse_from(["learnloop", "ask", "hi", "--level", "expert"]).is_err());
    }
}
