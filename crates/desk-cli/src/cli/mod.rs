//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use desk_core::config::{self, Config};
use desk_core::logging;
use desk_core::register::Role;
use desk_core::storage::SessionId;

mod commands;

#[derive(Parser)]
#[command(name = "desk")]
#[command(version)]
#[command(about = "Smart Desk terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Named session to keep the token in (default: this process only)
    #[arg(long, global = true, env = "DESK_SESSION", value_name = "ID")]
    session: Option<SessionId>,

    /// Override the registration endpoint from config
    #[arg(long, global = true, env = "DESK_REGISTER_URL", value_name = "URL")]
    register_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Register a new account without the interactive shell
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// Password confirmation (defaults to --password)
        #[arg(long)]
        confirm: Option<String>,

        /// Account role: user or admin
        #[arg(long, default_value = "user")]
        role: Role,
    },

    /// Inspect or change the token of a named session
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Manage named sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TokenCommands {
    /// Print the stored token as JSON
    Show,
    /// Store a token (any JSON value except null)
    Set {
        #[arg(value_name = "JSON")]
        json: String,
    },
    /// Remove the stored token
    Clear,
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Print a fresh session id
    New,
    /// End the session given by --session, deleting its stored state
    End,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init_file_logging(&config::paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        session,
        register_url,
    } = cli;

    let load_config = || -> Result<Config> {
        let mut config = Config::load().context("load config")?;
        if let Some(url) = register_url.as_deref() {
            config.registration_url = url.to_string();
        }
        Ok(config)
    };

    // default to the interactive shell
    let Some(command) = command else {
        return commands::tui::run(&load_config()?, session);
    };

    match command {
        Commands::Register {
            username,
            password,
            confirm,
            role,
        } => {
            let config = load_config()?;
            commands::register::run(
                &config,
                commands::register::RegisterArgs {
                    username,
                    confirm: confirm.unwrap_or_else(|| password.clone()),
                    password,
                    role,
                },
            )
            .await
        }

        Commands::Token { command } => {
            let session = commands::require_session(session)?;
            match command {
                TokenCommands::Show => commands::token::show(session),
                TokenCommands::Set { json } => commands::token::set(session, &json),
                TokenCommands::Clear => commands::token::clear(session),
            }
        }

        Commands::Session { command } => match command {
            SessionCommands::New => {
                commands::session::new();
                Ok(())
            }
            SessionCommands::End => commands::session::end(commands::require_session(session)?),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
