use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use feedtimer::OutputFormat;
use feedtimer::commands;
use feedtimer::config;
use feedtimer::logging;
use feedtimer::store::DisplayOrder;
use feedtimer::timer::SystemClock;

#[derive(Parser)]
#[command(name = "feed")]
#[command(about = "Feeding session timer and log")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the feeding timer
    Start {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Stop the timer and log the session
    Stop {
        #[arg(long, help = "Override the number of sides used")]
        sides: Option<u32>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Count one more side for the running session
    Side,
    /// Show whether the timer is running and for how long
    Status {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the running timer live until it is stopped
    Watch,
    /// List logged sessions
    List {
        #[arg(long, value_enum, default_value_t)]
        order: DisplayOrder,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Delete a session by its position in `feed list`
    Delete {
        #[arg(help = "Position shown by `feed list`")]
        index: usize,
        #[arg(long, value_enum, default_value_t)]
        order: DisplayOrder,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Log a session without running the timer
    Log {
        #[arg(long, help = "Duration in minutes (decimal, e.g. 12.5)")]
        minutes: f64,
        #[arg(long, default_value = "0", help = "Number of sides used")]
        sides: u32,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Totals and charts over all sessions
    Stats {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show or change configuration
    Config(ConfigArgs),
    /// Manage the remote sync token in the system keyring
    Token(TokenArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Set { key: String, value: String },
    Get { key: String },
}

#[derive(Args)]
struct TokenArgs {
    #[command(subcommand)]
    action: TokenAction,
}

#[derive(Subcommand)]
enum TokenAction {
    Set { token: String },
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::enable_logging(cli.verbose);

    let config = config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}. Using default configuration.", e);
        config::Config::default()
    });
    let clock = SystemClock;

    match &cli.command {
        Commands::Start { format } => {
            commands::timer::start(&config, &clock, *format)?;
        }
        Commands::Stop { sides, format } => {
            commands::timer::stop(&config, &clock, *sides, *format)?;
        }
        Commands::Side => {
            commands::timer::side(&config)?;
        }
        Commands::Status { format } => {
            commands::timer::status(&config, &clock, *format)?;
        }
        Commands::Watch => {
            commands::timer::watch(&config)?;
        }
        Commands::List { order, format } => {
            commands::sessions::list(&config, *order, *format)?;
        }
        Commands::Delete {
            index,
            order,
            format,
        } => {
            commands::sessions::delete(&config, *index, *order, *format)?;
        }
        Commands::Log {
            minutes,
            sides,
            format,
        } => {
            commands::sessions::log(&config, &clock, *minutes, *sides, *format)?;
        }
        Commands::Stats { format } => {
            commands::stats::stats(&config, *format)?;
        }
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Set { key, value } => commands::config::set(key, value, &config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
        },
        Commands::Token(args) => match &args.action {
            TokenAction::Set { token } => commands::token::set(token)?,
            TokenAction::Clear => commands::token::clear()?,
        },
    }

    Ok(())
}
