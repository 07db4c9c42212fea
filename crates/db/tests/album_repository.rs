//! Album repository tests against a live Postgres.
//!
//! Run with `DATABASE_URL=postgres://… cargo test -p recordings-db --features integration`.
//! `#[sqlx::test]` gives every test its own scratch database, which is
//! loaded from `sql/album.sql` before the test body runs.

#![cfg(feature = "integration")]

use recordings_db::repository::albums;
use recordings_db::{AlbumRepository, DbError, Lookup, NewAlbum, PgAlbumRepository};
use sqlx::PgPool;

async fn load_schema(pool: &PgPool) {
    sqlx::raw_sql(include_str!("../sql/album.sql"))
        .execute(pool)
        .await
        .expect("album schema should load");
}

#[sqlx::test(migrations = false)]
async fn find_by_artist_returns_both_coltrane_albums(pool: PgPool) {
    load_schema(&pool).await;
    let repo = PgAlbumRepository::new(pool);

    let mut albums = repo.find_by_artist("John Coltrane").await.unwrap();
    albums.sort_by(|a, b| a.title.cmp(&b.title));

    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].title, "Blue Train");
    assert_eq!(albums[0].price, 56.99);
    assert_eq!(albums[1].title, "Giant Steps");
    assert_eq!(albums[1].price, 63.99);
    assert!(albums.iter().all(|a| a.artist == "John Coltrane" && a.id > 0));
}

#[sqlx::test(migrations = false)]
async fn find_by_artist_without_match_is_empty(pool: PgPool) {
    load_schema(&pool).await;
    let albums = albums::find_by_artist(&pool, "Betty Carter").await.unwrap();
    assert!(albums.is_empty());
}

#[sqlx::test(migrations = false)]
async fn artist_name_is_bound_not_interpolated(pool: PgPool) {
    load_schema(&pool).await;
    let albums = albums::find_by_artist(&pool, "' OR '1'='1").await.unwrap();
    assert!(albums.is_empty());
}

#[sqlx::test(migrations = false)]
async fn find_by_id_returns_the_exact_row(pool: PgPool) {
    load_schema(&pool).await;
    let repo = PgAlbumRepository::new(pool);

    let album = repo.find_by_id(2).await.unwrap();
    assert_eq!(album, NewAlbum::new("Giant Steps", "John Coltrane", 63.99).with_id(2));
}

#[sqlx::test(migrations = false)]
async fn find_by_id_reports_missing_rows_as_not_found(pool: PgPool) {
    load_schema(&pool).await;
    let repo = PgAlbumRepository::new(pool);

    let err = repo.find_by_id(9_999).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { id: 9_999 }), "{err:?}");
}

#[sqlx::test(migrations = false)]
async fn insert_then_find_by_id_round_trips(pool: PgPool) {
    load_schema(&pool).await;
    let repo = PgAlbumRepository::new(pool);
    let betty = NewAlbum::new("The Modern Sound of Betty Carter", "Betty Carter", 49.99);

    let id = repo.insert(&betty).await.unwrap();
    assert!(id > 0);

    let stored = repo.find_by_id(id).await.unwrap();
    assert_eq!(stored, betty.with_id(id));
}

#[sqlx::test(migrations = false)]
async fn missing_table_is_a_query_error_with_context(pool: PgPool) {
    // No schema loaded: the selection itself fails.
    let err = albums::find_by_artist(&pool, "John Coltrane").await.unwrap_err();
    match err {
        DbError::Query { lookup, .. } => assert_eq!(lookup, Lookup::Artist("John Coltrane".into())),
        other => panic!("expected Query, got {other:?}"),
    }

    let err = albums::find_by_id(&pool, 1).await.unwrap_err();
    assert!(matches!(err, DbError::Query { lookup: Lookup::Id(1), .. }), "{err:?}");
}

#[sqlx::test(migrations = false)]
async fn constraint_violation_is_an_insert_error(pool: PgPool) {
    load_schema(&pool).await;
    // DECIMAL(5,2) tops out at 999.99.
    let too_expensive = NewAlbum::new("Kind of Blue", "Miles Davis", 12_345.0);

    let err = albums::insert(&pool, &too_expensive).await.unwrap_err();
    assert!(matches!(err, DbError::Insert { ref title, .. } if title == "Kind of Blue"), "{err:?}");

    let none = albums::find_by_artist(&pool, "Miles Davis").await.unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = false)]
async fn free_functions_run_inside_a_caller_owned_transaction(pool: PgPool) {
    load_schema(&pool).await;
    let mut tx = pool.begin().await.unwrap();

    let id = albums::insert(&mut *tx, &NewAlbum::new("Jeru", "Gerry Mulligan", 17.99))
        .await
        .unwrap();
    assert_eq!(albums::find_by_id(&mut *tx, id).await.unwrap().id, id);
    tx.rollback().await.unwrap();

    let err = albums::find_by_id(&pool, id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[sqlx::test(migrations = false)]
async fn undecodable_row_is_a_query_error_not_a_not_found(pool: PgPool) {
    // `title` is nullable here, so a stored row can fail to decode into `Album`.
    sqlx::raw_sql(
        r#"
        CREATE TABLE album (
          id     BIGSERIAL PRIMARY KEY,
          title  VARCHAR(128),
          artist VARCHAR(255) NOT NULL,
          price  DECIMAL(5,2) NOT NULL
        );
        INSERT INTO album (title, artist, price) VALUES ('Blue Train', 'John Coltrane', 56.99);
        INSERT INTO album (title, artist, price) VALUES (NULL, 'John Coltrane', 63.99);
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    let repo = PgAlbumRepository::new(pool);

    let err = repo.find_by_artist("John Coltrane").await.unwrap_err();
    match err {
        DbError::Query { lookup, source } => {
            assert_eq!(lookup, Lookup::Artist("John Coltrane".into()));
            assert!(matches!(source, sqlx::Error::ColumnDecode { .. }), "{source:?}");
        }
        other => panic!("expected Query, got {other:?}"),
    }

    let err = repo.find_by_id(2).await.unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(err, DbError::Query { lookup: Lookup::Id(2), .. }), "{err:?}");

    // The well-formed row still decodes.
    assert_eq!(repo.find_by_id(1).await.unwrap().title, "Blue Train");
}
