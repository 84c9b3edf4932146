//! [`Args`] definitions.

use clap::Parser;

/// Server computing property valuations.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file, optional.
    ///
    /// Values are overridden by the `CONF.`-prefixed environment variables.
    #[arg(short, long, env = "CONF_PATH", default_value = "config.toml")]
    pub config: String,
}

impl Args {
    /// Parses command line arguments, falling back to the environment.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
