//! `MockAlbumRepository` — an in-memory test double for `AlbumRepository`.
//!
//! Useful in tests of orchestrating code where a live Postgres is either
//! unavailable or irrelevant.  It mirrors the Postgres semantics: ids are
//! generated on insert, lookups return rows in insertion order, and a
//! missing id is `DbError::NotFound`.

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Album, AlbumRepository, DbError, Lookup, NewAlbum};

/// Behaviour injected into `MockAlbumRepository` at construction time.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Serve calls from the in-memory table.
    Store,
    /// Fail every call as if the connection had been refused.
    FailConnection(String),
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Album>,
    next_id: i64,
}

/// An album table held in memory.
#[derive(Debug)]
pub struct MockAlbumRepository {
    behaviour: MockBehaviour,
    table: Mutex<Table>,
}

impl Default for MockAlbumRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAlbumRepository {
    /// An empty table; the first insert gets id 1.
    pub fn new() -> Self {
        Self {
            behaviour: MockBehaviour::Store,
            table: Mutex::new(Table { rows: Vec::new(), next_id: 1 }),
        }
    }

    /// A table pre-filled with `albums`, ids assigned 1, 2, … in order.
    pub fn seeded(albums: impl IntoIterator<Item = NewAlbum>) -> Self {
        let repo = Self::new();
        {
            let mut table = repo.lock();
            for album in albums {
                table.push(album);
            }
        }
        repo
    }

    /// A repository whose every call fails with a connection error.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            behaviour: MockBehaviour::FailConnection(msg.into()),
            ..Self::new()
        }
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        // A panic while holding the lock cannot leave the table half-written.
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_connection(&self) -> Result<(), sqlx::Error> {
        match &self.behaviour {
            MockBehaviour::Store => Ok(()),
            MockBehaviour::FailConnection(msg) => Err(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                msg.clone(),
            ))),
        }
    }
}

impl Table {
    fn push(&mut self, album: NewAlbum) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(album.with_id(id));
        id
    }
}

#[async_trait]
impl AlbumRepository for MockAlbumRepository {
    async fn find_by_artist(&self, artist: &str) -> Result<Vec<Album>, DbError> {
        self.check_connection()
            .map_err(|e| DbError::query(Lookup::Artist(artist.to_owned()), e))?;

        Ok(self
            .lock()
            .rows
            .iter()
            .filter(|a| a.artist == artist)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Album, DbError> {
        self.check_connection()
            .map_err(|e| DbError::query(Lookup::Id(id), e))?;

        self.lock()
            .rows
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(DbError::NotFound { id })
    }

    async fn insert(&self, album: &NewAlbum) -> Result<i64, DbError> {
        self.check_connection()
            .map_err(|e| DbError::insert(&album.title, e))?;

        Ok(self.lock().push(album.clone()))
    }
}
