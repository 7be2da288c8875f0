
use super::*;
use crate::data_store::store_mock::StoreMock;
use crate::data_store::StoreError;
use crate::web::BookingAppState;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::{http, test, App};
use chrono::TimeZone;
use serde_json::{json, Value};
use std::sync::Arc;

fn make_state() -> (Arc<StoreMock>, BookingAppState) {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(&store);
    let state = BookingAppState {
        store: store.clone(),
        time_zone: chrono_tz::UTC,
    };
    (store, state)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .configure(configure_app)
                .app_data(web::Data::new($state)),
        )
        .await
    };
}

async fn body_text<B: actix_web::body::MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).unwrap()
}

fn location(res: &ServiceResponse<impl actix_web::body::MessageBody>) -> String {
    res.headers()
        .get(http::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned()
}

fn valid_venue_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "The Jazz Cellar"),
        ("city", "Oakland"),
        ("state", "CA"),
        ("address", "12 Broadway"),
        ("phone", "510-555-0101"),
        ("genres", "Jazz, blues"),
        ("image_link", ""),
        ("facebook_link", ""),
        ("website_link", "https://jazzcellar.example.com"),
        ("seeking_talent", "y"),
        ("seeking_description", "Looking for trios"),
    ]
}

#[actix_web::test]
async fn test_index_and_static_files() {
    let (_store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Matt Quevedo"));
    assert!(body.contains("css/main.css?hash="));

    let req = test::TestRequest::get()
        .uri("/static/css/main.css")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    assert_eq!(
        res.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "text/css"
    );
}

#[actix_web::test]
async fn test_venues_list_grouped_by_area() {
    let (_store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/venues").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    let san_francisco = body.find("San Francisco, CA").unwrap();
    let new_york = body.find("New York, NY").unwrap();
    assert!(san_francisco < new_york);
    assert!(body.contains("3 upcoming shows"));
    assert!(body.contains("The Dueling Pianos Bar"));
}

#[actix_web::test]
async fn test_artists_list() {
    let (_store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/artists").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("/artists/1\">Guns N Petals"));
    assert!(body.contains("3 upcoming shows"));
}

#[actix_web::test]
async fn test_search() {
    let (_store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/venues/search")
        .set_form([("search_term", "hop")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Number of search results for \"hop\": 1"));
    assert!(body.contains("The Musical Hop"));

    let req = test::TestRequest::post()
        .uri("/artists/search")
        .set_form([("search_term", "A")])
        .to_request();
    let res = test::call_service(&app, req).await;
    let body = body_text(res).await;
    assert!(body.contains("Number of search results for \"A\": 3"));

    // A missing search term matches everything
    let req = test::TestRequest::post()
        .uri("/artists/search")
        .set_form(Vec::<(&str, &str)>::new())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Number of search results for \"\": 3"));
}

#[actix_web::test]
async fn test_venue_and_artist_details() {
    let (_store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/venues/3").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("3 Upcoming Shows"));
    assert!(body.contains("1 Past Show<"));
    assert!(body.contains("Sun Apr 1, 2035 8:00 PM"));
    assert!(body.contains("/artists/2\">Matt Quevedo"));

    let req = test::TestRequest::get().uri("/artists/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("0 Upcoming Shows"));
    assert!(body.contains("1 Past Show<"));
    assert!(body.contains("/venues/1\">The Musical Hop"));
    assert!(body.contains("Currently seeking venues"));

    for uri in ["/venues/99", "/artists/99", "/venues/99/edit", "/nothing/here"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
        let body = body_text(res).await;
        assert!(body.contains("404 Not Found"));
    }
}

#[actix_web::test]
async fn test_create_venue() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/venues/create").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form(valid_venue_form())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/venues/4"));
    let flash_cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == "flash")
        .unwrap()
        .into_owned();

    {
        let data = store.data.lock().unwrap();
        let venue = data.venues.iter().find(|v| v.id == 4).unwrap();
        assert_eq!(venue.name, "The Jazz Cellar");
        assert_eq!(venue.genres, vec!["Jazz", "Blues"]);
        assert_eq!(venue.phone.as_deref(), Some("510-555-0101"));
        assert_eq!(venue.image_link, None);
        assert_eq!(
            venue.website.as_deref(),
            Some("https://jazzcellar.example.com")
        );
        assert!(venue.seeking_talent);
        assert_eq!(venue.seeking_description.as_deref(), Some("Looking for trios"));
    }

    // The flash message is shown on the next page
    let req = test::TestRequest::get()
        .uri("/venues/4")
        .cookie(flash_cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Venue The Jazz Cellar was successfully listed!"));
}

#[actix_web::test]
async fn test_create_venue_invalid() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let mut form = valid_venue_form();
    form.retain(|(k, _)| *k != "genres");
    for (key, value) in form.iter_mut() {
        match *key {
            "phone" => *value = "5105550101",
            "state" => *value = "XY",
            _ => {}
        }
    }
    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(res).await;
    assert!(body.contains("Not a phone number of the form XXX-XXX-XXXX"));
    assert!(body.contains("Not a US state code"));
    assert!(body.contains("Value missing in form data"));
    assert!(body.contains("The entered data is invalid."));
    // Entered values are kept in the form
    assert!(body.contains("value=\"The Jazz Cellar\""));

    assert_eq!(store.data.lock().unwrap().venues.len(), 3);
}

#[actix_web::test]
async fn test_create_venue_store_error() {
    let (store, state) = make_state();
    let app = init_app!(state);

    store.data.lock().unwrap().next_error =
        Some(StoreError::ConnectionError("connection refused".to_owned()));
    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form(valid_venue_form())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(res).await;
    assert!(body.contains("Venue The Jazz Cellar could not be saved"));
    assert_eq!(store.data.lock().unwrap().venues.len(), 3);
}

#[actix_web::test]
async fn test_edit_venue_and_artist() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/venues/1/edit").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("value=\"The Musical Hop\""));
    assert!(body.contains("value=\"Jazz, Reggae, Folk\""));

    let mut form = valid_venue_form();
    form[0].1 = "The Musical Hop & Bar";
    form.retain(|(k, _)| *k != "seeking_talent");
    let req = test::TestRequest::post()
        .uri("/venues/1/edit")
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/venues/1"));
    {
        let data = store.data.lock().unwrap();
        let venue = data.venues.iter().find(|v| v.id == 1).unwrap();
        assert_eq!(venue.name, "The Musical Hop & Bar");
        assert_eq!(venue.city, "Oakland");
        assert!(!venue.seeking_talent);
        assert_eq!(data.venues.len(), 3);
    }

    let req = test::TestRequest::post()
        .uri("/artists/2/edit")
        .set_form([
            ("name", "Matt Quevedo"),
            ("city", "Chicago"),
            ("state", "IL"),
            ("phone", ""),
            ("genres", "Jazz,Funk"),
            ("seeking_venue", "y"),
            ("seeking_description", "  "),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/artists/2"));
    {
        let data = store.data.lock().unwrap();
        let artist = data.artists.iter().find(|a| a.id == 2).unwrap();
        assert_eq!(artist.city, "Chicago");
        assert_eq!(artist.phone, None);
        assert_eq!(artist.genres, vec!["Jazz", "Funk"]);
        assert!(artist.seeking_venue);
        assert_eq!(artist.seeking_description, None);
    }

    let req = test::TestRequest::post()
        .uri("/artists/99/edit")
        .set_form([("name", "Nobody")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_venue_overlong_values() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let long_city = "Llanfair".repeat(25);
    let long_description = "We are looking for bands. ".repeat(24);
    let form: Vec<(&str, String)> = valid_venue_form()
        .into_iter()
        .map(|(key, value)| match key {
            "city" => (key, long_city.clone()),
            "seeking_description" => (key, long_description.clone()),
            _ => (key, value.to_owned()),
        })
        .collect();
    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(res).await;
    assert!(body.contains("Must not be longer than 120 characters"));
    assert!(body.contains("Must not be longer than 500 characters"));
    assert_eq!(store.data.lock().unwrap().venues.len(), 3);
}

#[actix_web::test]
async fn test_resubmit_unchanged_venue_and_artist() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let venue_form: Vec<(&str, String)> = {
        let data = store.data.lock().unwrap();
        let venue = data.venues.iter().find(|v| v.id == 1).unwrap();
        vec![
            ("name", venue.name.clone()),
            ("city", venue.city.clone()),
            ("state", venue.state.clone()),
            ("address", venue.address.clone()),
            ("phone", venue.phone.clone().unwrap_or_default()),
            ("genres", venue.genres.join(", ")),
            ("seeking_talent", "y".to_owned()),
            (
                "seeking_description",
                venue.seeking_description.clone().unwrap_or_default(),
            ),
        ]
    };
    let req = test::TestRequest::post()
        .uri("/venues/1/edit")
        .set_form(venue_form)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    {
        let data = store.data.lock().unwrap();
        let venue = data.venues.iter().find(|v| v.id == 1).unwrap();
        assert_eq!(venue.genres, vec!["Jazz", "Reggae", "Folk"]);
        assert_eq!(
            venue.seeking_description.as_deref(),
            Some("We are on the lookout for a local artist")
        );
    }

    for artist_id in 1..=3 {
        let artist_form: Vec<(&str, String)> = {
            let data = store.data.lock().unwrap();
            let artist = data.artists.iter().find(|a| a.id == artist_id).unwrap();
            vec![
                ("name", artist.name.clone()),
                ("city", artist.city.clone()),
                ("state", artist.state.clone()),
                ("phone", artist.phone.clone().unwrap_or_default()),
                ("genres", artist.genres.join(", ")),
            ]
        };
        let req = test::TestRequest::post()
            .uri(&format!("/artists/{}/edit", artist_id))
            .set_form(artist_form)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    }
}

#[actix_web::test]
async fn test_create_artist() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/artists/create")
        .set_form([
            ("name", "The Soul Trio"),
            ("city", "Austin"),
            ("state", "TX"),
            ("genres", "Soul"),
            ("image_link", "ftp://images.example.com/trio.png"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(res).await;
    assert!(body.contains("URL must start with http:// or https://"));

    let req = test::TestRequest::post()
        .uri("/artists/create")
        .set_form([
            ("name", "The Soul Trio"),
            ("city", "Austin"),
            ("state", "TX"),
            ("genres", "Soul"),
            ("image_link", "https://images.example.com/trio.png"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/artists/4"));
    let data = store.data.lock().unwrap();
    let artist = data.artists.iter().find(|a| a.id == 4).unwrap();
    assert_eq!(artist.name, "The Soul Trio");
    assert!(!artist.seeking_venue);
}

#[actix_web::test]
async fn test_delete_venue_and_artist() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::delete().uri("/venues/2").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"success": true}));
    assert!(store.data.lock().unwrap().venues.iter().all(|v| v.id != 2));

    // Venues and artists with shows are not deleted
    let req = test::TestRequest::delete().uri("/venues/1").to_request();
    let res = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"success": false}));
    let req = test::TestRequest::delete().uri("/artists/3").to_request();
    let res = test::call_service(&app, req).await;
    let flash_cookie = res
        .response()
        .cookies()
        .find(|c| c.name() == "flash")
        .map(Cookie::into_owned);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"success": false}));
    assert!(flash_cookie.is_some());
    {
        let data = store.data.lock().unwrap();
        assert!(data.venues.iter().any(|v| v.id == 1));
        assert!(data.artists.iter().any(|a| a.id == 3));
        assert_eq!(data.shows.len(), 5);
    }

    let req = test::TestRequest::delete().uri("/artists/99").to_request();
    let res = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"success": false}));

    store.data.lock().unwrap().shows.retain(|s| s.artist_id != 1);
    let req = test::TestRequest::delete().uri("/artists/1").to_request();
    let res = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"success": true}));
    assert_eq!(store.data.lock().unwrap().artists.len(), 2);
}

#[actix_web::test]
async fn test_shows() {
    let (store, state) = make_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/shows").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    let first = body.find("Tue May 21, 2019 9:00 PM").unwrap();
    let last = body.find("Sun Apr 15, 2035 8:00 PM").unwrap();
    assert!(first < last);

    let req = test::TestRequest::get().uri("/shows/create").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("<option value=\"2\">Matt Quevedo</option>"));

    let req = test::TestRequest::post()
        .uri("/shows/create")
        .set_form([
            ("artist_id", "42"),
            ("venue_id", "2"),
            ("start_time", "2035-05-01T21:00"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(res).await;
    assert!(body.contains("Unknown id"));
    assert_eq!(store.data.lock().unwrap().shows.len(), 5);

    let req = test::TestRequest::post()
        .uri("/shows/create")
        .set_form([
            ("artist_id", "1"),
            ("venue_id", "2"),
            ("start_time", "2035-05-01T21:00"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/shows"));
    let data = store.data.lock().unwrap();
    let show = data.shows.iter().find(|s| s.id == 6).unwrap();
    assert_eq!(show.artist_id, 1);
    assert_eq!(show.venue_id, 2);
    assert_eq!(
        show.start_time,
        chrono::Utc.with_ymd_and_hms(2035, 5, 1, 21, 0, 0).unwrap()
    );
}
