use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{check_data, serve};

#[derive(Parser)]
#[command(name = "fluscope")]
#[command(about = "Forecast dashboard backend with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Directory holding the published data documents
        ///
        /// Expected contents: locations.json, seasons.json, thresholds.json,
        /// nowcast_trends.json, and per-season ground_truth_<id>.json /
        /// predictions_<id>.json files.
        #[arg(short, long, env = "FLUSCOPE_DATA_DIR", default_value = "data")]
        data_dir: String,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Validate the data documents without serving
    ///
    /// Runs the full load, reporting per-season record counts and every
    /// record the loader would drop (inconsistent horizons, non-increasing
    /// thresholds, overlapping partitions, unparseable dates).
    CheckData {
        /// Directory holding the published data documents
        #[arg(short, long, env = "FLUSCOPE_DATA_DIR", default_value = "data")]
        data_dir: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data_dir,
                bind_address,
            } => {
                serve(&data_dir, &bind_address).await?;
            }
            Commands::CheckData { data_dir } => {
                check_data(&data_dir)?;
            }
        }
        Ok(())
    }
}
