//! End-to-end behavior of a search session on tokio's paused clock.

mod support;

use std::time::Duration;

use moviescout::app::FETCH_ERROR_MESSAGE;
use moviescout::ui::MovieSection;
use moviescout::{Config, Event, LoadState, MovieSummary};

use support::{record, run_for, runtime, settle, type_slowly, FakeCatalog, FakeStore, Reply};

const KEYSTROKE: Duration = Duration::from_millis(100);
const PAUSE: Duration = Duration::from_millis(900);

fn movies(titles: &[(i64, &str)]) -> Reply {
    Reply::Movies(titles.iter().map(|(id, title)| MovieSummary::new(*id, *title)).collect())
}

#[tokio::test(start_paused = true)]
async fn session_starts_with_popular_listing() {
    let catalog = FakeCatalog::new();
    catalog.respond("", movies(&[(10, "Popular One"), (11, "Popular Two")]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);

    rt.dispatch(&Event::Started).unwrap();
    assert!(rt.render_state().is_loading);
    settle(&mut rt).await;

    assert_eq!(catalog.calls(), vec![""]);
    assert_eq!(rt.state().load_state, LoadState::Success);
    assert_eq!(rt.state().movie_list.len(), 2);
    assert!(store.increments().is_empty());
}

#[tokio::test(start_paused = true)]
async fn short_terms_never_reach_the_catalog() {
    let catalog = FakeCatalog::new();
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    for term in ["d", "du"] {
        rt.dispatch(&Event::SearchTermChanged(term.to_string())).unwrap();
        settle(&mut rt).await;
    }
    assert_eq!(catalog.calls(), vec![""]);

    rt.dispatch(&Event::SearchTermChanged("dun".to_string())).unwrap();
    settle(&mut rt).await;
    assert_eq!(catalog.calls(), vec!["", "dun"]);
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_collapses_into_one_search() {
    let catalog = FakeCatalog::new();
    catalog.respond("batman", movies(&[(1, "Batman"), (2, "Batman Returns")]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    type_slowly(&mut rt, "batman", KEYSTROKE).await;
    settle(&mut rt).await;

    assert_eq!(catalog.calls(), vec!["", "batman"]);
    assert_eq!(store.increments(), vec![("batman".to_string(), 1)]);
    assert_eq!(rt.render_state().movie_list.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn quiet_period_follows_configuration() {
    let catalog = FakeCatalog::new();
    let store = FakeStore::new();
    let config = Config {
        debounce_ms: 200,
        ..Config::default()
    };
    let mut rt = runtime(&config, &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    rt.dispatch(&Event::SearchTermChanged("heat".to_string())).unwrap();
    run_for(&mut rt, Duration::from_millis(250)).await;

    assert_eq!(catalog.calls(), vec!["", "heat"]);
}

#[tokio::test(start_paused = true)]
async fn empty_search_succeeds_without_recording() {
    let catalog = FakeCatalog::new();
    catalog.respond("zzzz", Reply::Movies(vec![]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    rt.dispatch(&Event::SearchTermChanged("zzzz".to_string())).unwrap();
    settle(&mut rt).await;

    let state = rt.render_state();
    assert!(state.movie_list.is_empty());
    assert!(state.error_message.is_none());
    assert_eq!(rt.state().load_state, LoadState::Success);
    assert!(store.increments().is_empty());
}

#[tokio::test(start_paused = true)]
async fn server_error_keeps_previous_results() {
    let catalog = FakeCatalog::new();
    catalog.respond("heat", movies(&[(1, "Heat")]));
    catalog.respond("heat 2", Reply::Status(500));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    rt.dispatch(&Event::SearchTermChanged("heat".to_string())).unwrap();
    settle(&mut rt).await;
    rt.dispatch(&Event::SearchTermChanged("heat 2".to_string())).unwrap();
    settle(&mut rt).await;

    let state = rt.render_state();
    assert!(!state.is_loading);
    assert_eq!(state.error_message.as_deref(), Some(FETCH_ERROR_MESSAGE));
    assert_eq!(state.movie_list, vec![MovieSummary::new(1, "Heat")]);
    assert_eq!(rt.state().load_state, LoadState::Error);
    assert_eq!(
        rt.state().compute_viewmodel().movies,
        MovieSection::Error(FETCH_ERROR_MESSAGE.to_string())
    );
    assert_eq!(store.increments(), vec![("heat".to_string(), 1)]);
}

#[tokio::test(start_paused = true)]
async fn next_fetch_clears_the_error() {
    let catalog = FakeCatalog::new();
    catalog.respond("dune", Reply::Status(503));
    catalog.respond("dune 2", movies(&[(2, "Dune: Part Two")]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    rt.dispatch(&Event::SearchTermChanged("dune".to_string())).unwrap();
    settle(&mut rt).await;
    assert!(rt.render_state().error_message.is_some());

    rt.dispatch(&Event::SearchTermChanged("dune 2".to_string())).unwrap();
    settle(&mut rt).await;
    assert!(rt.render_state().error_message.is_none());
    assert_eq!(rt.state().load_state, LoadState::Success);
}

#[tokio::test(start_paused = true)]
async fn every_successful_search_is_counted() {
    let catalog = FakeCatalog::new();
    catalog.respond("alien", movies(&[(1, "Alien")]));
    catalog.respond("aliens", movies(&[(2, "Aliens")]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    for term in ["alien", "aliens", "alien"] {
        rt.dispatch(&Event::SearchTermChanged(term.to_string())).unwrap();
        settle(&mut rt).await;
    }

    assert_eq!(
        store.increments(),
        vec![
            ("alien".to_string(), 1),
            ("aliens".to_string(), 2),
            ("alien".to_string(), 1),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn stale_response_is_discarded_by_default() {
    let catalog = FakeCatalog::new();
    catalog.respond_after("alien", Duration::from_secs(5), movies(&[(1, "Alien")]));
    catalog.respond_after("aliens", Duration::from_millis(100), movies(&[(2, "Aliens")]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    rt.dispatch(&Event::SearchTermChanged("alien".to_string())).unwrap();
    run_for(&mut rt, PAUSE).await;
    rt.dispatch(&Event::SearchTermChanged("aliens".to_string())).unwrap();
    settle(&mut rt).await;

    assert_eq!(catalog.calls(), vec!["", "alien", "aliens"]);
    assert_eq!(rt.render_state().movie_list, vec![MovieSummary::new(2, "Aliens")]);
    assert_eq!(store.increments(), vec![("aliens".to_string(), 2)]);
}

#[tokio::test(start_paused = true)]
async fn stale_response_wins_in_legacy_mode() {
    let catalog = FakeCatalog::new();
    catalog.respond_after("alien", Duration::from_secs(5), movies(&[(1, "Alien")]));
    catalog.respond_after("aliens", Duration::from_millis(100), movies(&[(2, "Aliens")]));
    let store = FakeStore::new();
    let config = Config {
        discard_stale_responses: false,
        ..Config::default()
    };
    let mut rt = runtime(&config, &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    rt.dispatch(&Event::SearchTermChanged("alien".to_string())).unwrap();
    run_for(&mut rt, PAUSE).await;
    rt.dispatch(&Event::SearchTermChanged("aliens".to_string())).unwrap();
    settle(&mut rt).await;

    assert_eq!(rt.render_state().movie_list, vec![MovieSummary::new(1, "Alien")]);
    assert_eq!(
        store.increments(),
        vec![("aliens".to_string(), 2), ("alien".to_string(), 1)]
    );
}

#[tokio::test(start_paused = true)]
async fn recording_failure_does_not_touch_state() {
    let catalog = FakeCatalog::new();
    catalog.respond("batman", movies(&[(1, "Batman")]));
    let store = FakeStore::failing();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    rt.dispatch(&Event::SearchTermChanged("batman".to_string())).unwrap();
    settle(&mut rt).await;

    let state = rt.render_state();
    assert!(state.error_message.is_none());
    assert_eq!(state.movie_list, vec![MovieSummary::new(1, "Batman")]);
    assert!(state.trending_movies.is_empty());
    assert_eq!(rt.state().load_state, LoadState::Success);
}

#[tokio::test(start_paused = true)]
async fn trending_is_loaded_once_and_ranked() {
    let catalog = FakeCatalog::new();
    let records = (1..=6).rev().map(|n| record(&format!("term {n}"), n)).collect();
    let store = FakeStore::with_top(records);
    let mut rt = runtime(&Config::default(), &catalog, &store);

    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    let trending = rt.render_state().trending_movies;
    let ranked: Vec<(usize, String)> = trending.into_iter().map(|e| (e.rank, e.term)).collect();
    assert_eq!(
        ranked,
        vec![
            (1, "term 6".to_string()),
            (2, "term 5".to_string()),
            (3, "term 4".to_string()),
            (4, "term 3".to_string()),
            (5, "term 2".to_string()),
        ]
    );
    assert_eq!(store.list_calls(), 1);
    assert_eq!(catalog.calls(), vec![""]);
}

#[tokio::test(start_paused = true)]
async fn quit_stops_the_runtime() {
    let catalog = FakeCatalog::new();
    catalog.respond("batman", movies(&[(1, "Batman")]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    let handle = rt.handle();
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    handle.set_search_term("batman").unwrap();
    handle.quit().unwrap();
    settle(&mut rt).await;

    assert!(rt.is_stopped());
    assert_eq!(rt.render_state().search_term, "batman");
    assert_eq!(catalog.calls(), vec![""]);
    assert!(rt.step().await.unwrap().is_none());

    rt.shutdown().await;
    assert!(store.increments().is_empty());
}

#[tokio::test(start_paused = true)]
async fn finishing_input_searches_the_last_term_before_stopping() {
    let catalog = FakeCatalog::new();
    catalog.respond_after("batman", Duration::from_secs(2), movies(&[(1, "Batman")]));
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    let handle = rt.handle();
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    handle.set_search_term("batman").unwrap();
    handle.finish().unwrap();
    settle(&mut rt).await;

    assert!(rt.is_stopped());
    assert_eq!(catalog.calls(), vec!["", "batman"]);
    assert_eq!(rt.state().movie_list, vec![MovieSummary::new(1, "Batman")]);

    rt.shutdown().await;
    assert_eq!(store.increments(), vec![("batman".to_string(), 1)]);
}

#[tokio::test(start_paused = true)]
async fn finishing_idle_input_stops_at_once() {
    let catalog = FakeCatalog::new();
    let store = FakeStore::new();
    let mut rt = runtime(&Config::default(), &catalog, &store);
    let handle = rt.handle();
    rt.dispatch(&Event::Started).unwrap();
    settle(&mut rt).await;

    handle.finish().unwrap();
    assert!(rt.step().await.unwrap().is_none());
    assert!(rt.is_stopped());
    assert_eq!(catalog.calls(), vec![""]);
}
