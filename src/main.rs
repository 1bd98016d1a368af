mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{AuthCommand, CheckArgs, Cli, Command, IdCommand, pack, unpack};
use dbxtf::{ApiClient, ClientConfig, DbxError};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Id { command } => match command {
            IdCommand::Pack(args) => println!("{}", pack(args)?),
            IdCommand::Unpack(args) => println!("{}", unpack(args)?),
        },
        Command::Auth { command } => match command {
            AuthCommand::Check(args) => check(args).await?,
        },
    }

    Ok(())
}

async fn check(args: CheckArgs) -> Result<(), DbxError> {
    let host = args.host.ok_or_else(|| {
        DbxError::Config("No workspace host provided. Set DATABRICKS_HOST or use --host".to_string())
    })?;
    let token = args.token.ok_or_else(|| {
        DbxError::Config(
            "No API token provided. Set DATABRICKS_TOKEN or use --token flag".to_string(),
        )
    })?;

    let config = ClientConfig::new(host, token);
    let client = ApiClient::new(&config)?;
    let user = client.current_user().await?;

    tracing::info!(host = %client.host(), user_id = %user.id, "authentication verified");
    println!("{}", user.user_name);
    Ok(())
}
