mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::common::Session;
use cli::{Cli, Commands};
use vaultkeep::error::{JsonError, Result};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = dispatch(&cli);

    if let Err(e) = result {
        if cli.json {
            match serde_json::to_string(&JsonError::from_error(&e)) {
                Ok(body) => eprintln!("{}", body),
                Err(_) => eprintln!("Error: {}", e),
            }
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    let session = Session::open(cli.file.as_deref())?;
    let json = cli.json;

    match &cli.command {
        Commands::Add { name } => cli::add::run(&session, name, json),

        Commands::Get { name } => cli::get::run(&session, name, json),

        Commands::Update { name } => cli::update::run(&session, name, json),

        Commands::Delete { name } => cli::delete::run(&session, name, json),

        Commands::List => cli::list::run(&session, json),

        Commands::History { name } => cli::history::run(&session, name, json),

        Commands::Passwd { new_password } => {
            cli::passwd::run(&session, new_password.as_deref(), json)
        }

        Commands::Audit { command } => cli::audit::run(&session, command, json),

        Commands::Config { command } => cli::config::run(&session, command),
    }
}

fn init_tracing() {
    // Diagnostics go to stderr; stdout carries command output only.
    let env_filter =
        EnvFilter::try_from_env("VAULTKEEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
