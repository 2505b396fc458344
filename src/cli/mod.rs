use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

pub mod init;
pub mod migrate;
pub mod search;
pub mod serve;

use crate::assets::models::{AssetType, Orientation};
use crate::core::AppConfig;

#[derive(Clone, Copy, ValueEnum)]
pub enum AssetTypeArg {
    Image,
    Icon,
    All,
}

impl From<AssetTypeArg> for AssetType {
    fn from(arg: AssetTypeArg) -> Self {
        match arg {
            AssetTypeArg::Image => AssetType::Image,
            AssetTypeArg::Icon => AssetType::Icon,
            AssetTypeArg::All => AssetType::All,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrientationArg {
    Landscape,
    Portrait,
    Square,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Landscape => Orientation::Landscape,
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Square => Orientation::Square,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Create the storage directory and database
    Init {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Migrate db schema
    Migrate {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Search every configured asset source and print the JSON response
    Search {
        #[arg(long)]
        query: String,
        #[arg(long = "type", value_enum, default_value = "all")]
        asset_type: AssetTypeArg,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..=50))]
        per_page: u32,
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Init { db }) => {
            init::run(db, &config.db_path).await?;
        }
        Some(Command::Migrate { db }) => {
            migrate::run(db, &config.db_path).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Search {
            query,
            asset_type,
            page,
            per_page,
            orientation,
        }) => {
            let options = search::SearchOptions {
                asset_type: asset_type.into(),
                page,
                per_page,
                orientation: orientation.map(Into::into),
            };
            search::run(&query, options, &config).await?;
        }
        None => {}
    }

    Ok(())
}
