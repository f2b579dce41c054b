use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod host;

#[derive(Parser)]
#[command(name = "pomobar-cli", version, about = "Pomobar status-bar pomodoro timer")]
struct Cli {
    /// Log engine events at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer with a status line on stdout and commands on stdin
    Run(commands::run::RunArgs),
    /// Preferences: timer durations and long-break interval
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn dispatch(command: Commands) -> pomobar_core::Result<()> {
    match command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config { action } => commands::config::run(action),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "pomobar_core=debug,pomobar_cli=debug"
    } else {
        "pomobar_core=info,pomobar_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = dispatch(cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
