use clap::Parser;
use postbak::cli::{run, Cli};

#[tokio::main]
async fn main() {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing for the CLI.
    tracing_subscriber::fmt::init();
    tracing::info!("postbak startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    let code = run(cli).await;
    std::process::exit(code);
}
