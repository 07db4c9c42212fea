//! Repository layer for the `album` table.
//!
//! `albums` holds one free function per database operation; each takes any
//! `PgExecutor` and returns a `Result<T, DbError>`.  `AlbumRepository` is the
//! seam callers program against, with `PgAlbumRepository` as the Postgres
//! implementation and `crate::mock::MockAlbumRepository` as the test double.

pub mod albums;

use async_trait::async_trait;

use crate::{Album, DbError, NewAlbum};

pub use albums::PgAlbumRepository;

/// The three operations on the `album` table.
///
/// Implementations hold no state between calls beyond their injected
/// connection handle.
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// All albums whose artist equals `artist`, in the order the store
    /// returns them.  No match is an empty vector, not an error.
    async fn find_by_artist(&self, artist: &str) -> Result<Vec<Album>, DbError>;

    /// The album with the given id, or `DbError::NotFound`.
    async fn find_by_id(&self, id: i64) -> Result<Album, DbError>;

    /// Store `album` and return the id the store generated for it.
    async fn insert(&self, album: &NewAlbum) -> Result<i64, DbError>;
}
