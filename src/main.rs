use std::io::IsTerminal;

use clap::Parser;
use orderhub::adapter::inbound::cli::command::{Cli, ColorChoice, Commands};
use orderhub::adapter::inbound::cli::output::{self, OutputConfig};
use orderhub::adapter::inbound::cli::{operator, publish, query, run};
use orderhub::error::Result;
use orderhub::infrastructure::operator::entry::Operator;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    output::configure(OutputConfig::new(cli.json, cli.quiet, color));

    if operator::install(Box::new(Operator::new())).is_err() {
        output::error("operator already installed");
        std::process::exit(1);
    }

    if let Err(e) = dispatch(cli.command).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Publish(args) => publish::execute(&args).await,
        Commands::Order(args) => query::execute_order(&args).await,
        Commands::Orders(args) => query::execute_orders(&args).await,
    }
}
