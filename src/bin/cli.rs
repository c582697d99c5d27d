use clap::{Parser, Subcommand};
use log::error;

use pawfacts::client::{FactProvider, StoreClient};
use pawfacts::error_handling::types::ClientError;
use pawfacts::storage::types::Animal;

#[derive(Parser)]
#[command(name = "pawfacts-cli")]
#[command(version = "0.1.0")]
#[command(about = "Fetch random animal facts and manage the saved list")]
struct Args {
    /// Base URL of the fact store service
    #[arg(long, env = "PAWFACTS_API_URL", default_value = "http://localhost:3001")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and print a random fact
    Fact {
        /// Which animal: cat or dog
        #[arg(value_parser = parse_animal)]
        animal: Animal,
        /// Also save the fetched fact to the store
        #[arg(long)]
        save: bool,
    },
    /// List the saved facts
    Saved,
    /// Delete a saved fact by id
    Delete { id: String },
    /// Show the store service health
    Health,
}

fn parse_animal(s: &str) -> Result<Animal, String> {
    s.parse()
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .format_target(false)
        .init();

    let args = Args::parse();
    let store = StoreClient::new(&args.api_url);

    match args.command {
        Command::Fact { animal, save } => {
            // Fetch never fails; a provider outage only means a canned fact
            let fact = FactProvider::new().random_fact(animal).await;
            println!("{}", fact);
            if save {
                match store.save_fact(&fact, animal).await {
                    Ok(record) => println!("Fact saved successfully (id {})", record.id),
                    Err(e) => {
                        error!(
                            "Failed to save fact: {}. Make sure the fact store is running at {}.",
                            e, args.api_url
                        );
                        std::process::exit(1);
                    }
                }
            }
        }
        Command::Saved => match store.list_facts().await {
            Ok(facts) if facts.is_empty() => println!("No saved facts yet."),
            Ok(facts) => {
                for fact in facts {
                    println!("[{}] ({}) {}", fact.id, fact.animal.as_str(), fact.text);
                }
            }
            Err(ClientError::Unreachable(e)) => {
                error!(
                    "Network error: can't connect to the fact store at {} ({})",
                    args.api_url, e
                );
                std::process::exit(1);
            }
            Err(e) => {
                error!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Command::Delete { id } => match store.delete_fact(&id).await {
            Ok(message) => println!("{}", message),
            Err(e) => {
                error!(
                    "Failed to delete fact: {}. Make sure the fact store is running at {}.",
                    e, args.api_url
                );
                std::process::exit(1);
            }
        },
        Command::Health => match store.health().await {
            Ok(health) => println!(
                "status: {}, backend connected: {}, timestamp: {}",
                health.status, health.backend_connected, health.timestamp
            ),
            Err(e) => {
                error!("Health check failed: {}", e);
                std::process::exit(1);
            }
        },
    }
}
