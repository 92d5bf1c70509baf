use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = citydevs::cli::Cli::parse();
    if let Err(e) = citydevs::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
