use std::{env, path::PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use glucose_log::{
    config::{self, AppConfig},
    import,
    profile::SqliteProfileStore,
    render, tz,
};
use reading_aggregator::{
    FilterKind, ProfileStore, Reading, UserId,
    store::{load_chart, load_history},
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(version, about = "Blood glucose log")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct UserArg {
    /// Pre-authenticated user id
    #[arg(long)]
    user: UserId,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create the database and apply migrations
    Init,
    /// Manage profiles
    Profile(ProfileCmd),
    /// Record one reading
    Add {
        #[command(flatten)]
        user: UserArg,
        /// Blood glucose level
        #[arg(long)]
        glucose: f64,
        /// Wall clock ("2024-02-29 08:00") or RFC3339; defaults to now
        #[arg(long, value_name = "TIMESTAMP")]
        at: Option<String>,
        /// Food was eaten
        #[arg(long)]
        eaten: bool,
        /// Insulin units injected
        #[arg(long, value_name = "UNITS", conflicts_with = "insulin")]
        insulin_units: Option<f64>,
        /// Insulin was injected, units unknown
        #[arg(long)]
        insulin: bool,
    },
    /// Print readings, newest first
    History {
        #[command(flatten)]
        user: UserArg,
    },
    /// Print chart points for a day, week or month
    Chart {
        #[command(flatten)]
        user: UserArg,
        /// day | week | month; defaults to [chart] default_filter
        #[arg(long)]
        filter: Option<FilterKind>,
        /// Reference time; defaults to now
        #[arg(long, value_name = "TIMESTAMP")]
        at: Option<String>,
    },
    /// Append every reading of an exported profile document
    Import {
        #[command(flatten)]
        user: UserArg,
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args)]
struct ProfileCmd {
    #[command(subcommand)]
    sub: ProfileSub,
}

#[derive(Subcommand)]
enum ProfileSub {
    /// Create an empty profile
    Create {
        #[command(flatten)]
        user: UserArg,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => config::load_config_path(path)?,
        None => AppConfig::default(),
    };
    let zone = cfg.timezone()?;
    let store = SqliteProfileStore::open(&cfg.database_url()?)?;

    match cli.cmd {
        Cmd::Init => {
            info!(database = store.database_url(), "database ready");
            println!("Database ready at {}", store.database_url());
        }
        Cmd::Profile(ProfileCmd {
            sub: ProfileSub::Create { user: UserArg { user } },
        }) => {
            if store.create_profile(&user).await? {
                println!("Created profile {user}");
            } else {
                println!("Profile {user} already exists");
            }
        }
        Cmd::Add {
            user: UserArg { user },
            glucose,
            at,
            eaten,
            insulin_units,
            insulin,
        } => {
            let taken_at = match at {
                Some(s) => tz::parse_wall_clock(&s, zone)?,
                None => tz::now_in(zone),
            };
            let mut reading = Reading::new(glucose, taken_at).with_meal(eaten);
            if insulin || insulin_units.is_some() {
                reading = reading.with_insulin(insulin_units);
            }
            store.append(&user, reading).await?;
            info!(user = %user, at = %taken_at, "reading recorded");
        }
        Cmd::History {
            user: UserArg { user },
        } => {
            let log = load_history(&store, &user).await?;
            println!("{}", render::render_history(&log));
        }
        Cmd::Chart {
            user: UserArg { user },
            filter,
            at,
        } => {
            let kind = filter.unwrap_or(cfg.chart.default_filter);
            let reference = match at {
                Some(s) => tz::parse_wall_clock(&s, zone)?,
                None => tz::now_in(zone),
            };
            let series = load_chart(&store, &user, kind, reference).await?;
            println!("{}", render::render_chart(&series)?);
        }
        Cmd::Import {
            user: UserArg { user },
            file,
        } => {
            let doc = import::read_document(&file, zone)?;
            let written = store.import_document(&user, doc).await?;
            println!("Imported {written} readings for {user}");
        }
    }

    Ok(())
}
