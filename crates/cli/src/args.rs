use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "whatsurname")]
#[command(about = "Onomastic Intelligence Utility: cultural and linguistic analysis of personal names")]
#[command(
    long_about = "Analyzes a personal name: components, literal meaning, native script, \
                  ethnic background, geographic origin, likely gender and a reasoning trace.\n\n\
                  Run without arguments for the interactive session."
)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: $WHATSURNAME_CONFIG, then ./whatsurname.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a single name and exit
    Analyze {
        /// The name to analyze (e.g. "Mikhail")
        name: String,

        /// Print the result as a JSON object
        #[arg(long, visible_alias = "json-output")]
        json: bool,

        /// Give up on the inference engine after this many seconds
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },
}
