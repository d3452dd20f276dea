use clap::{Parser, Subcommand};
use forecast_navigator::commands::*;
use forecast_navigator::core::{
    command_init::SessionOptions, error::NavigatorError, print_error,
    print_error_with_structured_usage,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forecast-navigator")]
#[command(about = "Step-by-step navigation of a remote weather forecast catalog")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Catalog API base URL, with or without the trailing /api
    #[arg(long, global = true, env = "FORECAST_API_BASE_URL")]
    api_url: Option<String>,

    /// Region reference table, a file path or an http(s) URL
    #[arg(long, global = true, env = "FORECAST_REGION_TABLE")]
    region_table: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current path and the numbered options
    Status,
    /// Select an option at the current stage by number or label
    Select {
        /// Option number (e.g. "3") or label (e.g. "강남구")
        choice: Vec<String>,
    },
    /// Step back one level
    Back,
    /// Clear the whole selection
    Reset,
    /// Reload the listing below the deepest selection
    Retry,
    /// Toggle the preview of a file
    Preview {
        /// File number or file name
        choice: Vec<String>,
        /// Number of lines to show (1-200)
        #[arg(short = 'n', long)]
        lines: Option<u32>,
    },
    /// Download a file
    Download {
        /// File number or file name
        choice: Vec<String>,
        /// Directory to write the file to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show what the catalog holds
    Summary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let download_dir = match &cli.command {
        Commands::Download { output, .. } => output.clone(),
        _ => None,
    };
    let options = SessionOptions {
        api_base_url: cli.api_url,
        region_table: cli.region_table,
        download_dir,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Status => execute_status(&options).await,
            Commands::Select { choice } => execute_select(&options, choice).await,
            Commands::Back => execute_back(&options).await,
            Commands::Reset => execute_reset(&options).await,
            Commands::Retry => execute_retry(&options).await,
            Commands::Preview { choice, lines } => execute_preview(&options, choice, lines).await,
            Commands::Download { choice, .. } => execute_download(&options, choice).await,
            Commands::Summary => execute_summary(&options).await,
        }
    });

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn report(error: &NavigatorError) {
    log::debug!("Command failed: {error:?}");
    match error {
        NavigatorError::NoChoiceProvided => print_error_with_structured_usage(
            "No choice provided",
            &[
                "forecast-navigator select <number>",
                "forecast-navigator select <label>",
                "forecast-navigator preview <number> [--lines N]",
                "forecast-navigator download <number> [--output DIR]",
            ],
            &[("status", "shows the numbers available at the current stage")],
        ),
        other => print_error(&other.user_message()),
    }
}
