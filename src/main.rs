//! Onfleet CLI - inspect organizations and manage administrators

use clap::Parser;
use colored::Colorize;

mod cli;
mod output;

use cli::{AdminCommands, Cli, CommandContext, Commands, ConfigCommands, OrgCommands};
use onfleet::config::Config;
use onfleet::{AdministratorUpdate, NewAdministrator, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli).await {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    }
}

/// `--debug` forces debug output for this crate; otherwise RUST_LOG applies
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("onfleet", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<String> {
    match &cli.command {
        Commands::Version => Ok(format!("onfleet version {}", env!("CARGO_PKG_VERSION"))),
        Commands::Config(cmd) => {
            let path = Config::resolve_path(cli.config.as_deref())?;
            match cmd {
                ConfigCommands::SetKey { key } => cli::config::set_key(&path, key),
                ConfigCommands::Show => {
                    let effective = Config::load_or_default(&path)?
                        .with_overrides(cli.api_key.clone(), cli.api_host.clone());
                    Ok(cli::config::show(&path, &effective))
                }
            }
        }
        Commands::Org(cmd) => {
            let ctx = CommandContext::new(&cli)?;
            let client = ctx.client.as_ref();
            match cmd {
                OrgCommands::Get { id } => cli::org::get(client, id.as_deref(), ctx.format).await,
                OrgCommands::Delegatees => cli::org::delegatees(client, ctx.format).await,
            }
        }
        Commands::Admin(cmd) => {
            let ctx = CommandContext::new(&cli)?;
            let client = ctx.client.as_ref();
            match cmd {
                AdminCommands::List => cli::admin::list(client, ctx.format).await,
                AdminCommands::Create {
                    name,
                    email,
                    phone,
                    read_only,
                } => {
                    let admin = NewAdministrator {
                        name: name.clone(),
                        email: email.clone(),
                        phone: phone.clone(),
                        is_read_only: read_only.then_some(true),
                    };
                    cli::admin::create(client, admin, ctx.format).await
                }
                AdminCommands::Update {
                    id,
                    name,
                    email,
                    phone,
                } => {
                    let update = AdministratorUpdate {
                        name: name.clone(),
                        email: email.clone(),
                        phone: phone.clone(),
                        metadata: None,
                    };
                    cli::admin::update(client, id, update, ctx.format).await
                }
                AdminCommands::Delete { id } => cli::admin::delete(client, id).await,
            }
        }
    }
}
