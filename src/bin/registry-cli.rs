use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "registry-cli")]
#[command(about = "Query CLI for the land registry gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gateway and chain status
    Status,
    /// Fetch a parcel by token id
    Land { id: String },
    /// Current owner of a parcel
    Owner { id: String },
    /// Total registered parcels
    Supply,
    /// Parcel count for an owner address
    Balance { address: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = match &cli.command {
        Commands::Status => format!("{}/api/v1/status", cli.url),
        Commands::Land { id } => format!("{}/api/v1/lands/{}", cli.url, id),
        Commands::Owner { id } => format!("{}/api/v1/lands/{}/owner", cli.url, id),
        Commands::Supply => format!("{}/api/v1/supply", cli.url),
        Commands::Balance { address } => {
            format!("{}/api/v1/owners/{}/balance", cli.url, address)
        }
    };

    let res = client.get(&url).send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
    }

    match res.json::<Value>().await {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(e) => eprintln!("Error: response was not JSON: {}", e),
    }

    Ok(())
}
