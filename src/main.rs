mod client;
mod config;
mod dispatch;
mod error;
mod logging;
mod prediction;
mod selection;
mod ui;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::client::HttpClassifier;

#[derive(Parser)]
#[command(name = "voxcheck", about = "Voxcheck — is this voice AI or human?")]
struct Cli {
    /// Audio file to select on startup
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("logging disabled: {e}");
    }

    let classifier = HttpClassifier::new(config::endpoint())?;
    tracing::info!("Using classifier at {}", classifier.endpoint());
    ui::window::run_window(Arc::new(classifier), cli.file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_accepts_file_and_verbosity() {
        let cli = Cli::try_parse_from(["voxcheck", "-vv", "clip.wav"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("clip.wav")));
    }

    #[test]
    fn cli_has_no_endpoint_flag() {
        assert!(Cli::try_parse_from(["voxcheck", "--endpoint", "http://x"]).is_err());
    }
}
