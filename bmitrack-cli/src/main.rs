use std::error::Error;
use std::path::PathBuf;
use std::{env, process};

use clap::{Parser, Subcommand};
use log::debug;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};

use bmitrack_cli::App;

const DEFAULT_URL: &str = "http://localhost:8080/";

#[derive(Parser)]
#[command(name = "bmitrack")]
#[command(about = "BMI measurement tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the tracking service; falls back to BMITRACK_URL
    #[arg(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    AddUser { name: String },

    /// List registered users
    Users,

    /// Record a measurement and show the derived BMI
    Record {
        name: String,

        #[arg(long)]
        weight_kg: f64,

        #[arg(long)]
        height_cm: f64,
    },

    /// Show the measurement history of a user
    History { name: String },

    /// Show the BMI trend of a user
    Trend { name: String },

    /// Export every stored measurement to a CSV file
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let cli = Cli::parse();
    let url = cli
        .url
        .or_else(|| env::var("BMITRACK_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_owned());
    debug!("Using service at {}", url);

    let app = App::new(Box::new(bmitrack_client::create(url)));
    match run(&app, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

async fn run(app: &App, command: Commands) -> Result<String, bmitrack_cli::AppError> {
    match command {
        Commands::AddUser { name } => app.add_user(&name).await,
        Commands::Users => app.list_users().await,
        Commands::Record {
            name,
            weight_kg,
            height_cm,
        } => app.record(&name, weight_kg, height_cm).await,
        Commands::History { name } => app.history(&name).await,
        Commands::Trend { name } => app.trend(&name).await,
        Commands::Export { path } => app.export(&path).await,
    }
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let stdout = ConsoleAppender::builder().build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(log::LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}
