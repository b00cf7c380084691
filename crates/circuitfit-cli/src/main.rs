use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "circuitfit", version, about = "Guided circuit-training timer")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Routine catalog management
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// Run or preview a workout
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Completed-workout statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Current user identity
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Routine { action } => commands::routine::run(action),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
