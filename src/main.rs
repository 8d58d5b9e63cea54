use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod instructions;
mod openspec;
mod session;
mod skills;
mod team;
#[cfg(test)]
mod testutil;
mod utils;

use cli::{Cli, Commands, RoleCommands, WorkerCommands};
use commands::worker;

fn init_tracing() {
    // stdout carries command output, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => commands::create::execute(args).await,
        Commands::Open(args) => commands::open::execute(args).await,
        Commands::OpenAll(args) => commands::open::execute_all(args).await,
        Commands::Assign(args) => commands::assign::execute(args).await,
        Commands::Status => commands::status::execute().await,
        Commands::Delete(args) => commands::delete::execute(args).await,
        Commands::Merge(args) => commands::merge::execute(args).await,
        Commands::Reply(args) => commands::reply::execute(args).await,
        Commands::ReplyMain(args) => commands::reply_main::execute(args).await,
        Commands::Worker(cmd) => match cmd {
            WorkerCommands::Create(args) => worker::create::execute(args).await,
            WorkerCommands::Open(args) => worker::open::execute(args).await,
            WorkerCommands::Assign(args) => worker::assign::execute(args).await,
            WorkerCommands::Status => worker::status::execute().await,
            WorkerCommands::Merge(args) => worker::merge::execute(args).await,
            WorkerCommands::Delete(args) => worker::delete::execute(args).await,
        },
        Commands::Role(RoleCommands::List) => commands::role::execute_list().await,
    }
}
