mod collect;
mod export;
mod report;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::collect::CollectOptions;

#[derive(Debug, Parser)]
#[command(name = "bizscan")]
#[command(about = "Collect Florida business-for-sale listings and export them to JSON and CSV")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect listings for the configured counties and export JSON + CSV
    Collect {
        /// Collection config file (defaults to BIZSCAN_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the exported files (defaults to BIZSCAN_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Override max_pages_per_county from the config file
        #[arg(long)]
        max_pages: Option<u32>,

        /// Skip the randomized pause between page fetches
        #[arg(long)]
        no_delay: bool,

        /// Show which counties would be collected without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List every county in the area catalog
    Areas,
    /// Manage the collection config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Write a starter config (five largest counties, restaurants and retail excluded)
    Init {
        /// Config file to write (defaults to BIZSCAN_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config after merging the file over defaults
    Show {
        /// Config file to read (defaults to BIZSCAN_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bizscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Collect {
            config: config_path,
            output_dir,
            max_pages,
            no_delay,
            dry_run,
        }) => {
            let options = CollectOptions {
                config_path: config_path.unwrap_or_else(|| config.collection_config_path.clone()),
                output_dir: output_dir.unwrap_or_else(|| config.output_dir.clone()),
                max_pages,
                no_delay,
                dry_run,
            };
            collect::run_collect(&config, &options).await?;
        }
        Some(Commands::Areas) => print_areas(),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init {
                config: path,
                force,
            } => {
                let path = path.unwrap_or_else(|| config.collection_config_path.clone());
                init_config(&path, force)?;
            }
            ConfigCommands::Show { config: path } => {
                let path = path.unwrap_or_else(|| config.collection_config_path.clone());
                show_config(&path)?;
            }
        },
        None => Cli::command().print_help()?,
    }

    Ok(())
}

fn print_areas() {
    let mut current_region = None;
    for area in bizscan_core::all_areas() {
        if current_region != Some(area.region) {
            println!("{}:", area.region);
            current_region = Some(area.region);
        }
        println!(
            "  {:<14} {:<22} pop. {}",
            area.id,
            area.display_name,
            report::format_thousands(u64::from(area.population))
        );
    }
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    let starter = bizscan_core::CollectionConfig::starter();
    bizscan_core::save_collection_config(path, &starter)?;
    println!(
        "wrote starter config to {} ({} counties, {} excluded categories)",
        path.display(),
        starter.selected_counties.len(),
        starter.excluded_categories.len()
    );
    Ok(())
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    let collection = bizscan_core::load_collection_config(path)?;
    println!("{}", serde_json::to_string_pretty(&collection)?);

    let resolution = bizscan_core::resolve_areas(&collection.selected_counties);
    for id in &resolution.unknown {
        println!("warning: county '{id}' is not in the area catalog and will be skipped");
    }
    Ok(())
}
