use clap::{Parser, Subcommand};
use serde_json::Value;
use teamhex::model::link::escape_segment;

#[derive(Parser)]
#[command(name = "teamhex-cli")]
#[command(about = "Command line client for the Team Hex API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server version and data generation date
    Info,
    /// List all leagues
    Leagues,
    /// List all teams, optionally filtered by name
    Teams {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List the teams of a league
    League {
        league: String,
    },
    /// Show a single team
    Team {
        league: String,
        name: String,
    },
}

impl Commands {
    /// Request path for this command, with path segments escaped.
    fn path(&self) -> String {
        match self {
            Commands::Info => "/".to_string(),
            Commands::Leagues => "/leagues".to_string(),
            Commands::Teams { .. } => "/teams".to_string(),
            Commands::League { league } => format!("/leagues/{}", escape_segment(league)),
            Commands::Team { league, name } => {
                format!("/leagues/{}/{}", escape_segment(league), escape_segment(name))
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let mut request = client.get(url);
    if let Commands::Teams { search: Some(search) } = &cli.command {
        request = request.query(&[("search", search)]);
    }

    let res = request.send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text.trim_end());
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
