use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use statsforge_dashboard::{api, cli, config::Config, models::ViewScope};

#[derive(Parser)]
#[command(name = "statsforge")]
#[command(about = "Football stats dashboard and prediction explainer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Overall,
    Home,
    Away,
    All,
}

impl ScopeArg {
    fn scopes(self) -> Vec<ViewScope> {
        match self {
            ScopeArg::Overall => vec![ViewScope::Overall],
            ScopeArg::Home => vec![ViewScope::Home],
            ScopeArg::Away => vec![ViewScope::Away],
            ScopeArg::All => ViewScope::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List teams
    Teams {
        #[arg(short, long)]
        competition: Option<String>,
        #[arg(short, long)]
        season: Option<String>,
    },
    /// Show a team's statistics
    Stats {
        #[arg(short, long)]
        team: String,
        #[arg(short, long)]
        competition: Option<String>,
        #[arg(short, long)]
        season: Option<String>,
        #[arg(long, value_enum, default_value = "overall")]
        scope: ScopeArg,
        /// Print the resolved view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the standings at a date
    Standings {
        #[arg(short, long)]
        competition: String,
        #[arg(short, long)]
        season: String,
        /// Cut-off date, YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        /// Also write the table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// List upcoming matches
    Matches {
        #[arg(short, long)]
        competition: Option<String>,
        #[arg(short, long)]
        season: Option<String>,
    },
    /// Predict and explain an upcoming match
    Predict {
        #[arg(short, long)]
        match_id: Option<i64>,
        #[arg(long, default_value = "modello_base")]
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables (RUST_LOG included)
    dotenv::dotenv().ok();

    // Initialize tracing; stdout is kept for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }
            tracing::info!("Starting stats dashboard on port {}", config.port);
            api::serve(config).await?;
        }
        Some(Commands::Teams { competition, season }) => {
            cli::list_teams(&config, competition.as_deref(), season.as_deref()).await?;
        }
        Some(Commands::Stats {
            team,
            competition,
            season,
            scope,
            json,
        }) => {
            cli::show_stats(
                &config,
                &team,
                competition.as_deref(),
                season.as_deref(),
                &scope.scopes(),
                json,
            )
            .await?;
        }
        Some(Commands::Standings {
            competition,
            season,
            date,
            csv,
        }) => {
            cli::show_standings(&config, &competition, &season, &date, csv.as_deref()).await?;
        }
        Some(Commands::Matches { competition, season }) => {
            cli::list_matches(&config, competition.as_deref(), season.as_deref()).await?;
        }
        Some(Commands::Predict { match_id, model }) => {
            cli::predict(&config, match_id, &model).await?;
        }
        None => {
            // Default to serving
            tracing::info!("Starting stats dashboard on port {}", config.port);
            api::serve(config).await?;
        }
    }

    Ok(())
}
