use clap::Parser;
use console::style;
use stagehand::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("✖").red());
            err.downcast_ref::<stagehand::Error>()
                .map(|e| e.exit_code())
                .unwrap_or(1)
        }
    };

    std::process::exit(code);
}
