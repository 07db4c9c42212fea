//! `recordings` CLI entry-point.
//!
//! Available sub-commands:
//! - `demo`      — list John Coltrane's albums, fetch album 2, add a new album.
//! - `by-artist` — list albums by an artist.
//! - `by-id`     — show one album.
//! - `add`       — insert an album and print its id.

mod commands;
mod config;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recordings_db::{pool::create_pool, NewAlbum, PgAlbumRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Format;
use config::DbConfig;

#[derive(Parser)]
#[command(
    name = "recordings",
    about = "Query and add albums in the recordings database",
    version
)]
struct Cli {
    #[command(flatten)]
    db: DbConfig,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the walk-through against the seeded `album` table.
    Demo,
    /// List every album by an artist.
    ByArtist {
        /// Artist name, matched exactly.
        name: String,
    },
    /// Show the album with the given id.
    ById {
        id: i64,
    },
    /// Add an album and print the id it was given.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        price: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let format = if cli.json { Format::Json } else { Format::Text };

    let options = cli.db.connect_options().context("invalid database settings")?;
    let pool = create_pool(options, cli.db.max_connections).await?;
    info!("connected!");

    let repo = PgAlbumRepository::new(pool.clone());
    let mut out = io::stdout().lock();

    let result = match cli.command {
        Command::Demo => commands::demo(&repo, format, &mut out).await,
        Command::ByArtist { name } => commands::by_artist(&repo, &name, format, &mut out).await,
        Command::ById { id } => commands::by_id(&repo, id, format, &mut out).await,
        Command::Add { title, artist, price } => {
            let album = NewAlbum::new(title, artist, price);
            commands::add(&repo, &album, format, &mut out).await.map(|_| ())
        }
    };
    out.flush()?;
    pool.close().await;

    result
}
