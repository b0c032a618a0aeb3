use clap::Parser;
use dotenv::dotenv;
use pairlab::cli::{
    BenfordCliConfig, Cli, Commands, ScreenCliConfig, SimulateCliConfig, SweepCliConfig,
};
use pairlab::commands::{run_benford, run_screen, run_simulate, run_sweep};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // Load environment variables from the .env file
    dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.verbose));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli.command) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Screen(args) => run_screen(ScreenCliConfig::try_from(args)?),
        Commands::Simulate(args) => run_simulate(SimulateCliConfig::try_from(args)?),
        Commands::Sweep(args) => run_sweep(SweepCliConfig::try_from(args)?),
        Commands::Benford(args) => run_benford(BenfordCliConfig::from(args)),
    }
}
