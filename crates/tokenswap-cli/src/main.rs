use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokenswap_core::swap::{CombatEvent, SwapMode};
use tokenswap_interaction::heroforge_api::DEFAULT_BASE_URL;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tokenswap")]
#[command(about = "TokenSwap CLI - HeroForge catalog browsing and combat token model swaps", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
pub struct GlobalOptions {
    /// Settings file (defaults to <config dir>/tokenswap/settings.toml)
    #[arg(long, global = true, env = "TOKENSWAP_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Scene file standing in for the tabletop host
    #[arg(long, global = true)]
    pub scene: Option<PathBuf>,

    /// HeroForge API base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Comma-separated auth tokens; overrides the stored key
    #[arg(long, global = true, env = "HEROFORGE_AUTH_KEY", hide_env_values = true)]
    pub auth_key: Option<String>,

    /// Reuse a fetched catalog for this many seconds within one run
    #[arg(long, global = true, value_name = "SECONDS")]
    pub cache_max_age: Option<u32>,

    /// Derive pack colors from pack names instead of picking them at random
    #[arg(long, global = true)]
    pub stable_pack_colors: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and list miniatures in browser order
    Browse {
        /// Case-insensitive name filter
        #[arg(long)]
        query: Option<String>,
        /// Print the selected miniature's reference
        #[arg(long)]
        select: Option<String>,
        /// Print JSON instead of a table
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Print the browser HTML
        #[arg(long)]
        html: bool,
    },
    /// Resolve model paths or catalog references to loadable asset paths
    Resolve {
        #[arg(value_name = "REFERENCE", required = true)]
        references: Vec<String>,
    },
    /// List model picker entries for the whole catalog
    HeroList,
    /// Point every mapped token at its model for MODE
    Swap { mode: SwapMode },
    /// Simulate a combat lifecycle event
    Combat { event: CombatEvent },
    /// List scene tokens bound to actors with their current models
    Tokens,
    /// Inspect or edit the module settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show character rows and their model paths
    Show,
    /// Store the auth key (comma-separated tokens)
    SetAuthKey { key: String },
    /// Set one actor's path for MODE
    Assign {
        actor_id: String,
        mode: SwapMode,
        path: String,
    },
    /// Select a catalog miniature by id and assign its reference
    Pick {
        actor_id: String,
        mode: SwapMode,
        good_id: String,
    },
    /// Replace all assignments from `<actorId>-<mode>=<path>` fields
    Form {
        #[arg(value_name = "FIELD")]
        fields: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let ctx = commands::context::AppContext::load(&cli.global).await?;

    match cli.command {
        Commands::Browse {
            query,
            select,
            json,
            html,
        } => {
            let format = if json {
                commands::catalog::OutputFormat::Json
            } else if html {
                commands::catalog::OutputFormat::Html
            } else {
                commands::catalog::OutputFormat::Table
            };
            commands::catalog::browse(&ctx, query, select, format).await?
        }
        Commands::Resolve { references } => commands::catalog::resolve(&ctx, &references).await?,
        Commands::HeroList => commands::catalog::hero_list(&ctx).await?,
        Commands::Swap { mode } => commands::swap::swap(&ctx, mode).await?,
        Commands::Combat { event } => commands::swap::combat(&ctx, event).await?,
        Commands::Tokens => commands::config::tokens(&ctx).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&ctx).await?,
            ConfigAction::SetAuthKey { key } => commands::config::set_auth_key(&ctx, &key).await?,
            ConfigAction::Assign {
                actor_id,
                mode,
                path,
            } => commands::config::assign(&ctx, &actor_id, mode, &path).await?,
            ConfigAction::Pick {
                actor_id,
                mode,
                good_id,
            } => commands::config::pick(&ctx, &actor_id, mode, &good_id).await?,
            ConfigAction::Form { fields } => commands::config::form(&ctx, &fields).await?,
        },
    }

    Ok(())
}
