//! CLI frontend for the Chi War shot-clock encounter engine.

mod commands;
mod fight_file;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "cw",
    about = "Shot-clock encounter runner for cinematic action RPGs",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Fight file describing the fight and its combatants
    #[arg(short, long, global = true, default_value = "fight.toml")]
    file: PathBuf,

    /// Directory where session state is kept
    #[arg(long, global = true, default_value = ".cw")]
    state: PathBuf,

    /// Role to act with
    #[arg(long = "as", global = true, value_enum, default_value_t = Role::Gm)]
    role: Role,

    /// User id for role checks (players may only act as combatants they own)
    #[arg(long, global = true)]
    user: Option<uuid::Uuid>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

/// Who is issuing the command.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    /// Gamemaster of the campaign
    Gm,
    /// Campaign member
    Player,
    /// Site administrator
    Admin,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the encounter and roll the first initiative
    Start,

    /// Roll initiative for a new round
    Roll,

    /// Call the next combatant's turn
    Advance,

    /// Take an action (attack or defend)
    Act {
        /// Action type: attack or defend
        action: String,

        /// Acting combatant (case-insensitive name)
        #[arg(short, long)]
        actor: String,

        /// Target combatant (case-insensitive name)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Stop the encounter
    Stop,

    /// Show turn order and wounds
    Status,

    /// Print the combat log
    Log {
        /// Export as markdown
        #[arg(short, long)]
        markdown: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = commands::Context::open(
        &cli.global.file,
        &cli.global.state,
        cli.global.role,
        cli.global.user,
        cli.global.json,
    )
    .and_then(|mut ctx| match cli.command {
        Commands::Start => commands::start::run(&mut ctx),
        Commands::Roll => commands::roll::run(&mut ctx),
        Commands::Advance => commands::advance::run(&mut ctx),
        Commands::Act {
            action,
            actor,
            target,
        } => commands::act::run(&mut ctx, &action, &actor, target.as_deref()),
        Commands::Stop => commands::stop::run(&mut ctx),
        Commands::Status => commands::status::run(&ctx),
        Commands::Log { markdown } => commands::log::run(&ctx, markdown),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
