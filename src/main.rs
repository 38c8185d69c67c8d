mod app;
mod config;
mod controller;
mod favorites;
mod joke;
mod keys;
mod log;
#[allow(dead_code)]
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use controller::JokeController;
use favorites::{FavoritesStore, FileStorage};
use joke::HttpJokeClient;

#[derive(Parser)]
#[command(
    name = "dadjokes",
    about = "Fetch dad jokes in your terminal and keep the good ones",
    version
)]
struct Cli {
    /// Config directory override
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Joke endpoint override
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a single joke and print it
    Fetch {
        /// Also add the joke to your favorites
        #[arg(long)]
        favorite: bool,
    },
    /// List saved favorites
    Favorites,
    /// Show debug information
    Debug,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::initialize(true);

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => config::get_config_dir()?,
    };
    let mut config = config::Config::load(&config_dir).unwrap_or_else(|e| {
        tracing::warn!("Using default config: {}", e);
        config::Config::default()
    });
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let favorites_path = config.favorites_path(&config_dir);
    let new_controller =
        || JokeController::new(FavoritesStore::new(Box::new(FileStorage::new(&favorites_path))));

    match cli.command {
        Some(Commands::Fetch { favorite }) => {
            let client = HttpJokeClient::new(&config.endpoint, &config.user_agent)?;
            let mut controller = new_controller();
            if favorite {
                // Refuse to overwrite a file we could not read.
                controller.load_favorites()?;
            }
            controller.fetch_joke(&client).await?;
            println!("{}", controller.current().text);
            if favorite {
                controller.favorite_current();
                controller.persist()?;
                println!(
                    "Saved to favorites ({} total)",
                    controller.favorite_count()
                );
            }
            Ok(())
        }
        Some(Commands::Favorites) => {
            let mut controller = new_controller();
            controller.load_favorites()?;
            if !controller.has_favorites() {
                println!("No favorites yet.");
            }
            for (i, joke) in controller.favorites().iter().enumerate() {
                println!("{:>3}. {}", i + 1, joke.text);
            }
            Ok(())
        }
        Some(Commands::Debug) => {
            println!("Debug information:");
            println!("  Config directory: {}", config_dir.display());
            println!("  Favorites file: {}", favorites_path.display());
            println!("  Endpoint: {}", config.endpoint);
            println!("  User agent: {}", config.user_agent);
            println!("  Log file: {}", log::log_file_path().display());
            Ok(())
        }
        None => app::run(config, config_dir),
    }
}
