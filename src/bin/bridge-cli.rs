use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Query a running Firebase bridge", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check bridge liveness
    Health,
    /// Print the JSON history of a database path
    History {
        #[arg(short, long)]
        path: String,
    },
    /// Print the rendered HTML card list of a database path
    View {
        #[arg(short, long)]
        path: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        sub: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        amount_key: Option<String>,
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_json(res).await?;
        }
        Commands::History { path } => {
            let res = client
                .get(format!("{}/history", base))
                .query(&[("path", path)])
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::View {
            path,
            title,
            sub,
            unit,
            amount_key,
            compact,
        } => {
            let mut query = vec![("path", path)];
            let optional = [
                ("title", title),
                ("sub", sub),
                ("unit", unit),
                ("amountKey", amount_key),
            ];
            query.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));
            if compact {
                query.push(("compact", "1".to_string()));
            }

            let res = client
                .get(format!("{}/view", base))
                .query(&query)
                .send()
                .await?;
            let status = res.status();
            let body = res.text().await?;
            if !status.is_success() {
                eprintln!("Error: bridge returned status {}", status);
            }
            println!("{}", body);
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: bridge returned status {}", status);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
