use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod host;

#[derive(Parser)]
#[command(name = "glareguard-cli", version, about = "GlareGuard screen exposure tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's screen time, blue-light level and protection score
    Status,
    /// Track screen time in the foreground until interrupted
    Watch(commands::watch::WatchArgs),
    /// Turn the warm-tone colour filter on or off
    Filter {
        #[arg(value_enum)]
        state: commands::toggle::Switch,
    },
    /// Turn break reminders on or off
    Reminders {
        #[arg(value_enum)]
        state: commands::toggle::Switch,
    },
    /// Compute level and score for given usage without touching storage
    Score(commands::score::ScoreArgs),
    /// Zero today's recorded screen time
    Reset,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GLAREGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::run(),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Filter { state } => commands::toggle::run_filter(state),
        Commands::Reminders { state } => commands::toggle::run_reminders(state),
        Commands::Score(args) => commands::score::run(args),
        Commands::Reset => commands::reset::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
