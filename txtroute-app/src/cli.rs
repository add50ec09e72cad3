use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Route `txt <group> <message>` commands to configured groups.
#[derive(Parser, Debug)]
#[command(name = "txtroute", version, about)]
pub struct Cli {
    /// Group catalog (YAML/TOML/JSON). Defaults to `<config dir>/txtroute/txtroute.yaml`.
    #[arg(short, long, env = "TXTROUTE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON instead of text.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Mirror logs to stderr at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recognise a single command given as arguments; exits 1 when nothing matches.
    Parse {
        /// The command text, e.g. `txt fire team go now`.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Recognise every line read from stdin, printing one JSON result per line.
    Listen,
    /// Print the catalog in the order group names are tried.
    Groups,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("txtroute").join("txtroute.yaml"))
        .unwrap_or_else(|| PathBuf::from("txtroute.yaml"))
}
