//! Sub-command bodies.
//!
//! Each command talks to an `AlbumRepository` and writes its result to `out`,
//! so the same code runs against Postgres in the binary and against
//! `MockAlbumRepository` in tests.

use std::io::Write;

use anyhow::{Context, Result};
use recordings_db::{Album, AlbumRepository, NewAlbum};
use serde_json::json;
use tracing::debug;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

fn album_line(album: &Album) -> String {
    format!(
        "{}\t{}\t{}\t{:.2}",
        album.id, album.title, album.artist, album.price
    )
}

fn write_albums(out: &mut dyn Write, albums: &[Album], format: Format) -> Result<()> {
    match format {
        Format::Text => {
            for album in albums {
                writeln!(out, "{}", album_line(album))?;
            }
        }
        Format::Json => writeln!(out, "{}", serde_json::to_string(albums)?)?,
    }
    Ok(())
}

/// Print every album by `artist`.
pub async fn by_artist(
    repo: &dyn AlbumRepository,
    artist: &str,
    format: Format,
    out: &mut dyn Write,
) -> Result<()> {
    let albums = repo
        .find_by_artist(artist)
        .await
        .with_context(|| format!("listing albums by {artist:?}"))?;
    debug!(count = albums.len(), "albums by artist");
    write_albums(out, &albums, format)
}

/// Print the album with `id`.
pub async fn by_id(
    repo: &dyn AlbumRepository,
    id: i64,
    format: Format,
    out: &mut dyn Write,
) -> Result<()> {
    let album = repo
        .find_by_id(id)
        .await
        .with_context(|| format!("looking up album {id}"))?;
    match format {
        Format::Text => writeln!(out, "{}", album_line(&album))?,
        Format::Json => writeln!(out, "{}", serde_json::to_string(&album)?)?,
    }
    Ok(())
}

/// Store `album` and print its new id.
pub async fn add(
    repo: &dyn AlbumRepository,
    album: &NewAlbum,
    format: Format,
    out: &mut dyn Write,
) -> Result<i64> {
    let id = repo
        .insert(album)
        .await
        .with_context(|| format!("adding album {:?}", album.title))?;
    match format {
        Format::Text => writeln!(out, "{id}")?,
        Format::Json => writeln!(out, "{}", json!({ "id": id }))?,
    }
    Ok(id)
}

/// The walk-through: list John Coltrane's albums, fetch album 2, then add
/// "The Modern Sound of Betty Carter".
pub async fn demo(repo: &dyn AlbumRepository, format: Format, out: &mut dyn Write) -> Result<()> {
    let albums = repo
        .find_by_artist("John Coltrane")
        .await
        .context("listing albums by \"John Coltrane\"")?;

    let album = repo.find_by_id(2).await.context("looking up album 2")?;

    let betty = NewAlbum::new("The Modern Sound of Betty Carter", "Betty Carter", 49.99);
    let id = repo
        .insert(&betty)
        .await
        .context("adding \"The Modern Sound of Betty Carter\"")?;

    match format {
        Format::Text => {
            writeln!(out, "Albums found:")?;
            write_albums(out, &albums, format)?;
            writeln!(out, "Album found: {}", album_line(&album))?;
            writeln!(out, "ID of added album: {id}")?;
        }
        Format::Json => {
            let report = json!({
                "albums_found": albums,
                "album_found": album,
                "added_album_id": id,
            });
            writeln!(out, "{report}")?;
        }
    }
    Ok(())
}
