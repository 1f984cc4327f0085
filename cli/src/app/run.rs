//! Command dispatch
//!
//! [`run_with`] is the only place an envelope is written.

use std::ffi::OsString;
use std::io::Write;

use serde_json::json;
use tracing::{debug, error};

use crate::app::context::AppContext;
use crate::cli::{self, Commands, EnvCommands, Parsed, SubdomainCommands};
use crate::commands;
use crate::errors::CliError;
use crate::output::envelope::Envelope;
use crate::process::idempotency::Toggle;

/// Parse `args`, run the command, write one envelope to `sink` and return the exit code
pub async fn run_with<I, T, W>(args: I, ctx: &AppContext, sink: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write + ?Sized,
{
    let envelope = match cli::parse(args) {
        Ok(Parsed::Help(text)) => Envelope::sync(json!({ "help": text })),
        Ok(Parsed::Run(cli)) => match execute(cli.command, ctx).await {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!("command failed: {}", e);
                Envelope::error(&e)
            }
        },
        Err(e) => Envelope::error(&e),
    };

    if let Err(e) = envelope.write_to(sink) {
        error!("failed to write response: {}", e);
    }
    envelope.exit_code()
}

/// Run one parsed command
pub async fn execute(command: Commands, ctx: &AppContext) -> Result<Envelope, CliError> {
    match command {
        Commands::Login { token, url, region } => {
            commands::auth::login(ctx, &token, url, region).await
        }
        Commands::Logout => commands::auth::logout(ctx).await,
        Commands::Status => commands::auth::status(ctx).await,
        Commands::Version => Ok(commands::version::version()),
        Commands::Discover {
            service,
            include_envs,
        } => commands::discover::discover(ctx, service.as_deref(), include_envs).await,
        Commands::Start(args) => {
            commands::lifecycle::run_action(ctx, commands::lifecycle::Action::Start, &args).await
        }
        Commands::Stop(args) => {
            commands::lifecycle::run_action(ctx, commands::lifecycle::Action::Stop, &args).await
        }
        Commands::Restart(args) => {
            commands::lifecycle::run_action(ctx, commands::lifecycle::Action::Restart, &args)
                .await
        }
        Commands::Scale(args) => commands::lifecycle::scale(ctx, &args).await,
        Commands::Env { command } => match command {
            EnvCommands::Get(scope) => commands::env::get(ctx, &scope).await,
            EnvCommands::Set {
                scope,
                sensitive,
                pairs,
            } => commands::env::set(ctx, &scope, &pairs, sensitive).await,
            EnvCommands::Delete { scope, keys } => {
                commands::env::delete(ctx, &scope, &keys).await
            }
        },
        Commands::Import(args) => commands::import::import(ctx, &args).await,
        Commands::Delete { service, confirm } => {
            commands::delete::delete(ctx, service.as_deref(), confirm).await
        }
        Commands::Process { process_id } => commands::process::show(ctx, &process_id).await,
        Commands::Cancel { process_id } => commands::process::cancel(ctx, &process_id).await,
        Commands::Subdomain { command } => match command {
            SubdomainCommands::Enable(args) => {
                commands::subdomain::toggle(ctx, Toggle::Enable, &args).await
            }
            SubdomainCommands::Disable(args) => {
                commands::subdomain::toggle(ctx, Toggle::Disable, &args).await
            }
        },
        Commands::Logs(args) => commands::logs::logs(ctx, &args).await,
        Commands::Events { service, limit } => {
            commands::events::events(ctx, service.as_deref(), limit).await
        }
    }
}
