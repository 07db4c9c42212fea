//! Typed error type for the db crate.

use std::fmt;

use thiserror::Error;

/// The subject of a failed selection, kept so callers can report or branch
/// on what was being looked up.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Artist(String),
    Id(i64),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artist(name) => write!(f, "artist {name:?}"),
            Self::Id(id) => write!(f, "id {id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    /// A selection could not be executed or one of its rows failed to decode.
    #[error("album query by {lookup} failed")]
    Query {
        lookup: Lookup,
        #[source]
        source: sqlx::Error,
    },

    /// A lookup by id matched no row.
    #[error("no such album: id {id}")]
    NotFound { id: i64 },

    /// The insert, or reading back the generated id, failed.
    #[error("inserting album {title:?} failed")]
    Insert {
        title: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("could not connect to database")]
    Connect(#[source] sqlx::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn query(lookup: Lookup, source: sqlx::Error) -> Self {
        Self::Query { lookup, source }
    }

    pub(crate) fn insert(title: &str, source: sqlx::Error) -> Self {
        Self::Insert { title: title.to_owned(), source }
    }
}
