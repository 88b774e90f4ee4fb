use clap::{Parser, Subcommand};
use dotenv::dotenv;

mod browse;
mod command;
mod config;
mod error;
mod favorites;
mod render;

use config::Settings;
use error::Result;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base url of the job listing service, overrides JOB_BOARD_URL
    #[clap(long)]
    url: Option<String>,

    /// Request timeout in seconds, overrides JOB_BOARD_TIMEOUT_SECS
    #[clap(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse the job listing page by page
    Browse {
        /// Page to open once the first page is loaded
        #[clap(long, default_value_t = 1)]
        page: u32,
    },
    /// Print the saved favorite jobs
    Favorites {},
}

async fn run(args: Cli) -> Result<()> {
    let settings = Settings::from_env(args.url, args.timeout)?;
    match args.command {
        Commands::Browse { page } => browse::run(&settings, page).await,
        Commands::Favorites {} => favorites::run(&settings).await,
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    if let Err(e) = run(args).await {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
