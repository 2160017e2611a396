use chrono::NaiveDate;
use steam_ingest_catalog::*;
use steam_ingest_db::*;

fn seed_game(conn: &rusqlite::Connection, title: &str) -> i64 {
    insert_game(
        conn,
        &NewGame {
            title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 12, 9),
            developer: "CD PROJEKT RED".to_string(),
            price: 66000,
            description: String::new(),
        },
    )
    .unwrap()
}

fn add_image(conn: &rusqlite::Connection, game_id: i64, image_type: ImageType, sort_order: u32) {
    insert_game_image(
        conn,
        &NewGameImage {
            game_id,
            image_url: format!("https://cdn.example/{}-{}.jpg", image_type, sort_order),
            image_type,
            sort_order,
        },
    )
    .unwrap();
}

#[test]
fn find_game_round_trips_fields() {
    let conn = open_memory().unwrap();
    let id = seed_game(&conn, "Cyberpunk 2077");
    let game = find_game(&conn, id).unwrap().unwrap();
    assert_eq!(game.title, "Cyberpunk 2077");
    assert_eq!(game.release_date, NaiveDate::from_ymd_opt(2020, 12, 9));
    assert_eq!(game.price, 66000);
}

#[test]
fn find_missing_game_is_none() {
    let conn = open_memory().unwrap();
    assert!(find_game(&conn, 7).unwrap().is_none());
}

#[test]
fn game_detail_not_found() {
    let conn = open_memory().unwrap();
    assert!(matches!(
        game_detail(&conn, 7),
        Err(OperationError::NotFound { .. })
    ));
}

#[test]
fn images_thumbnail_first_then_sort_order() {
    let conn = open_memory().unwrap();
    let id = seed_game(&conn, "Cyberpunk 2077");
    add_image(&conn, id, ImageType::Detail, 2);
    add_image(&conn, id, ImageType::Detail, 1);
    add_image(&conn, id, ImageType::Thumbnail, 1);

    let images = images_for_game(&conn, id).unwrap();
    let order: Vec<(ImageType, u32)> = images
        .iter()
        .map(|i| (i.image_type, i.sort_order))
        .collect();
    assert_eq!(
        order,
        vec![
            (ImageType::Thumbnail, 1),
            (ImageType::Detail, 1),
            (ImageType::Detail, 2),
        ]
    );
}

#[test]
fn genres_for_game_in_link_order_without_duplicates() {
    let conn = open_memory().unwrap();
    let id = seed_game(&conn, "Cyberpunk 2077");
    for (genre_id, name) in [(25, "RPG"), (1, "Action")] {
        ensure_genre(
            &conn,
            &Genre {
                genre_id,
                genre_name: name.to_string(),
            },
        )
        .unwrap();
        link_game_genre(&conn, id, genre_id).unwrap();
    }
    link_game_genre(&conn, id, 25).unwrap();

    let genres = genres_for_game(&conn, id).unwrap();
    let ids: Vec<i64> = genres.iter().map(|g| g.genre_id).collect();
    assert_eq!(ids, vec![25, 1]);
}

#[test]
fn list_games_newest_first() {
    let conn = open_memory().unwrap();
    seed_game(&conn, "First");
    seed_game(&conn, "Second");
    seed_game(&conn, "Third");

    let titles: Vec<String> = list_games(&conn, 2)
        .unwrap()
        .into_iter()
        .map(|g| g.title)
        .collect();
    assert_eq!(titles, vec!["Third", "Second"]);
}

#[test]
fn stats_count_each_table() {
    let conn = open_memory().unwrap();
    let id = seed_game(&conn, "Cyberpunk 2077");
    add_image(&conn, id, ImageType::Thumbnail, 1);
    add_image(&conn, id, ImageType::Detail, 1);
    add_image(&conn, id, ImageType::Detail, 2);
    ensure_genre(
        &conn,
        &Genre {
            genre_id: 1,
            genre_name: "Action".to_string(),
        },
    )
    .unwrap();
    link_game_genre(&conn, id, 1).unwrap();

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(
        stats,
        CatalogStats {
            games: 1,
            genres: 1,
            genre_links: 1,
            thumbnails: 1,
            details: 2,
        }
    );
}
