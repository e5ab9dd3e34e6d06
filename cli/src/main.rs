use clap::{Parser, Subcommand};
mod commands;
use commands::frame::FrameCommand;
use commands::simulate::SimulateCommand;

#[derive(Parser)]
#[command(name = "seqcli")]
#[command(about = "Siren sequencer bench tool")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Simulate(SimulateCommand),
    Frame(FrameCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate(cmd) => cmd.execute().await?,
        Commands::Frame(cmd) => cmd.execute()?,
    }

    Ok(())
}
