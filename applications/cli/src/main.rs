/// Tune - terminal music player transport
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tune_cli::{
    config::CliConfig,
    input::HELP,
    player::{run_player, OutputMode},
};
use tune_session::Session;
use tune_transport::format_time;

#[derive(Parser)]
#[command(name = "tune")]
#[command(about = "Simulated music player transport", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive player reading commands from stdin
    Play {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Track length in seconds (overrides configuration)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Print states and notifications as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print a number of seconds as M:SS
    Format {
        /// Seconds
        seconds: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            duration,
            json,
        } => {
            play(config, duration, json).await?;
        }
        Commands::Format { seconds } => {
            println!("{}", format_time(seconds));
        }
    }

    Ok(())
}

async fn play(
    config_path: Option<PathBuf>,
    duration: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    // Load configuration
    let mut config = CliConfig::load(config_path.as_deref())?;
    if let Some(duration) = duration {
        config.transport.duration_secs = duration;
    }
    config.validate()?;

    // Initialize tracing on stderr so stdout stays clean for the player
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        "Starting player: {} track, tick every {}ms",
        format_time(config.transport.duration_secs),
        config.transport.tick_interval_ms
    );

    let session = Session::spawn(&config.transport)?;
    let handle = session.handle();

    let mode = if json {
        OutputMode::Json
    } else {
        println!("{}", HELP);
        OutputMode::Text
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let result = run_player(&handle, stdin, &mut stdout, mode).await;

    session.shutdown().await;
    tracing::info!("Player stopped");

    result?;
    Ok(())
}
