//! Album queries against Postgres.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use crate::{
    DbError, Lookup,
    models::{Album, NewAlbum},
    repository::AlbumRepository,
};

// `id` and `price` are cast so an INT/SERIAL id or a NUMERIC price column
// still decodes into `i64`/`f64`.
const SELECT_BY_ARTIST: &str = r#"
    SELECT id::int8 AS id, title, artist, price::float8 AS price
    FROM album
    WHERE artist = $1
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id::int8 AS id, title, artist, price::float8 AS price
    FROM album
    WHERE id = $1
"#;

const INSERT: &str = r#"
    INSERT INTO album (title, artist, price)
    VALUES ($1, $2, $3)
    RETURNING id::int8
"#;

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Fetch every album by `artist`.
///
/// The cursor is drained by `fetch_all` and released on every path, including
/// a decode failure part-way through the rows.
pub async fn find_by_artist<'e, E: PgExecutor<'e>>(
    executor: E,
    artist: &str,
) -> Result<Vec<Album>, DbError> {
    let rows = sqlx::query_as::<_, Album>(SELECT_BY_ARTIST)
        .bind(artist)
        .fetch_all(executor)
        .await
        .map_err(|e| DbError::query(Lookup::Artist(artist.to_owned()), e))?;

    Ok(rows)
}

/// Fetch a single album by its primary key.
///
/// Returns `DbError::NotFound` when no row matches; every other failure is a
/// `DbError::Query`.
pub async fn find_by_id<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<Album, DbError> {
    let row = sqlx::query_as::<_, Album>(SELECT_BY_ID)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| DbError::query(Lookup::Id(id), e))?
        .ok_or(DbError::NotFound { id })?;

    Ok(row)
}

/// Insert `album` and return the generated id in the same round trip.
pub async fn insert<'e, E: PgExecutor<'e>>(executor: E, album: &NewAlbum) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(INSERT)
        .bind(&album.title)
        .bind(&album.artist)
        .bind(album.price)
        .fetch_one(executor)
        .await
        .map_err(|e| DbError::insert(&album.title, e))?;

    Ok(id)
}

// ---------------------------------------------------------------------------
// Pool-backed repository
// ---------------------------------------------------------------------------

/// `AlbumRepository` over an injected Postgres pool.
///
/// The pool's lifecycle (opening, closing) belongs to the caller.
#[derive(Debug, Clone)]
pub struct PgAlbumRepository {
    pool: PgPool,
}

impl PgAlbumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AlbumRepository for PgAlbumRepository {
    async fn find_by_artist(&self, artist: &str) -> Result<Vec<Album>, DbError> {
        find_by_artist(&self.pool, artist).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Album, DbError> {
        find_by_id(&self.pool, id).await
    }

    async fn insert(&self, album: &NewAlbum) -> Result<i64, DbError> {
        insert(&self.pool, album).await
    }
}
