//! `recordings-db` crate — pure persistence layer for the `album` table.
//!
//! Provides a connection helper, the `Album` row struct, and the album
//! repository (Postgres implementation plus an in-memory mock).  The
//! repository never logs; it only builds errors and hands them back.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod mock;

pub use pool::DbPool;
pub use error::{DbError, Lookup};
pub use models::{Album, NewAlbum};
pub use repository::{AlbumRepository, PgAlbumRepository};
pub use mock::MockAlbumRepository;
