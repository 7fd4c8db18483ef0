//! Cli — command-line surface.

use clap::Parser;

/// Watch live logs from every running instance of a deployment.
#[derive(Parser, Debug)]
#[command(name = "fleetwatch", version)]
pub struct Cli {
    /// Director endpoint, host[:port]
    pub director: String,

    /// Component names to watch; empty means all components
    pub components: Vec<String>,

    /// Gateway identity as user@host (defaults to vcap@<director host>)
    #[arg(long)]
    pub gateway: Option<String>,
}
