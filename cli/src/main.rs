use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod command;
mod prompt;
mod view;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    app::Args::parse().run().await
}
