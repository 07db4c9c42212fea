//! Row structs that map 1-to-1 onto the `album` table.
//!
//! These are *persistence* models; they carry no behaviour beyond
//! conversion between the stored and the to-be-stored shape.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted album row, decoded from `(id, title, artist, price)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Album {
    /// Assigned by Postgres on insert.
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

/// The column values of an album that has not been stored yet.
///
/// There is no `id`: Postgres generates it and `insert` returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl NewAlbum {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }

    /// Attach the id the store assigned, producing the row a lookup would return.
    pub fn with_id(self, id: i64) -> Album {
        Album {
            id,
            title: self.title,
            artist: self.artist,
            price: self.price,
        }
    }
}

impl Album {
    /// Drop the id, e.g. to store a copy of an existing album.
    pub fn without_id(&self) -> NewAlbum {
        NewAlbum::new(self.title.clone(), self.artist.clone(), self.price)
    }
}
