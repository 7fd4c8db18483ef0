use clap::Parser;

use fleetwatch::cli::Cli;
use fleetwatch::runtime::boot;

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let (session, config) = boot::boot(cli)?;
    let gateway_override = cli
        .gateway
        .clone()
        .or_else(|| config.gateway_override(&cli.director));

    session
        .run(&cli.director, gateway_override.as_deref(), &cli.components)
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    boot::init_logging();
    let cli = Cli::parse();

    // The session is one cancellable unit; ctrl-c drops it whole.
    let outcome = tokio::select! {
        outcome = run(&cli) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    };

    if let Err(err) = outcome {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
