use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use serde_json::Value;

use htm_client::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "htm-client", about = "Talk to an HTM engine's model API")]
struct Cli {
    /// Base URL of the engine. Overrides HTM_ENGINE_URL.
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a model with the given input range. A no-op if it already exists.
    Create {
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        min: f64,
        #[arg(long, allow_negative_numbers = true)]
        max: f64,
    },
    /// Append one reading through the `event` endpoint.
    Post {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Seconds since the Unix epoch. Defaults to now.
        #[arg(long)]
        timestamp: Option<i64>,
    },
    /// Append one reading through the `bulkEvent` endpoint.
    Bulk {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long)]
        timestamp: Option<i64>,
    },
    /// Print every data point of a model as JSON.
    Data { id: String },
    /// Print the timestamp of a model's most recent point.
    LastUpdated { id: String },
}

fn now() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;

    Ok(elapsed.as_secs() as i64)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.url {
        config.url = url;
    }
    log::debug!("Config: {:?}", &config);

    let client = config.into_client()?;

    match cli.command {
        Command::Create { id, min, max } => {
            client
                .create_model(&id, min, max)
                .await
                .with_context(|| format!("failed to create model {}", id))?;
        }
        Command::Post {
            id,
            value,
            timestamp,
        } => {
            let timestamp = timestamp.map_or_else(now, Ok)?;
            client
                .post_data(&id, value, timestamp)
                .await
                .with_context(|| format!("failed to post data to {}", id))?;
        }
        Command::Bulk {
            id,
            value,
            timestamp,
        } => {
            let timestamp = timestamp.map_or_else(now, Ok)?;
            client
                .post_bulk_data(&id, value, timestamp)
                .await
                .with_context(|| format!("failed to post bulk data to {}", id))?;
        }
        Command::Data { id } => {
            let data = client
                .get_data(&id)
                .await
                .with_context(|| format!("failed to get data for {}", id))?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::LastUpdated { id } => {
            let last_updated = client
                .get_last_updated(&id)
                .await
                .with_context(|| format!("failed to get last update of {}", id))?;
            match last_updated {
                Some(Value::String(timestamp)) => println!("{}", timestamp),
                Some(timestamp) => println!("{}", timestamp),
                None => println!("no data"),
            }
        }
    }

    Ok(())
}
