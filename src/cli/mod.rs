// CLI module
// Environment-backed configuration parsing

mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse the configuration from the environment and command line
///
/// Loads a `.env` file from the working directory first, if there is one.
/// On invalid or missing configuration clap prints the error and exits
/// the process.
pub fn parse_args() -> CliArgs {
    dotenvy::dotenv().ok();
    CliArgs::parse()
}
