pub mod browse;
pub mod cache;
pub mod cli;
pub mod discovery;
pub mod document;
pub mod error;
pub mod introspection;
pub mod path_de;
pub mod prompt;
pub mod report;
pub mod schema;
pub mod selection;
pub mod transport;
pub mod variables;

#[cfg(test)]
mod fixtures;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let command_line_interface = cli::CommandLineInterface::load();
    tracing::debug!("{command_line_interface:?}");
    if let Err(error) = command_line_interface.run().await {
        report::error(&error);
        std::process::exit(1);
    }
}
