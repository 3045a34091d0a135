use clap::{Parser, Subcommand};
use log::error;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use meal_finder::{
    App, DetailController, FinderConfig, FinderError, MealDbClient, MealSource, OutputFormat,
    Query, Renderer, Screen, SearchController,
};

#[derive(Debug, Parser)]
#[command(
    name = "meal-finder",
    version,
    about = "Search TheMealDB recipes from the terminal"
)]
struct Cli {
    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Base URL of the recipe API (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search once and print the result cards
    Search {
        /// Meal name to search for
        query: String,
    },
    /// Look up one meal by id and print its recipe
    Show {
        /// TheMealDB meal id, e.g. 52771
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, FinderError> {
    let mut config = FinderConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let source: Arc<dyn MealSource> = Arc::new(MealDbClient::new(&config)?);
    let renderer = config.format.renderer();

    match cli.command {
        None => {
            let screen = Screen::new(renderer, io::stdout());
            let mut app = App::new(source, screen);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            app.run(stdin).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Search { query }) => {
            let query = match Query::parse(&query) {
                Ok(query) => query,
                Err(e) => return Ok(fail(renderer.as_ref(), &e.to_string())),
            };
            match SearchController::new(source).search_query(&query).await {
                Ok(meals) => {
                    println!("{}", renderer.results(Some(&query), &meals));
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => Ok(fail(renderer.as_ref(), &e.to_string())),
            }
        }
        Some(Command::Show { id }) => match DetailController::new(source).lookup(&id).await {
            Ok(detail) => {
                println!("{}", renderer.detail(&detail, None));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => Ok(fail(renderer.as_ref(), &e.to_string())),
        },
    }
}

fn fail(renderer: &dyn Renderer, message: &str) -> ExitCode {
    eprintln!("{}", renderer.error(message, None));
    ExitCode::FAILURE
}
