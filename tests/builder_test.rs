mod common;

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use common::{FakeSession, Recorder, requests, track};
use mixcli::{builder, dispatch::Dispatcher, types::TrackRequest};

fn start(
    build_session: impl FnOnce(FakeSession) -> FakeSession + Send + 'static,
) -> (Arc<Mutex<Recorder>>, Dispatcher<FakeSession>) {
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    let session_recorder = Arc::clone(&recorder);
    let dispatcher =
        Dispatcher::start(move || Ok(build_session(FakeSession::new(session_recorder)))).unwrap();
    (recorder, dispatcher)
}

#[tokio::test]
async fn one_unmatched_row_yields_a_single_track_playlist() {
    let (recorder, dispatcher) = start(|session| {
        session.with_result(
            "Queen",
            "Bohemian Rhapsody",
            vec![track("uri:bohemian", "Bohemian Rhapsody", "Queen")],
        )
    });

    let rows = requests(&[
        ("Queen", "Bohemian Rhapsody"),
        ("NoSuchArtist", "NoSuchSong"),
    ]);
    builder::build(&dispatcher, rows, "Classics").await.unwrap();

    dispatcher.request_stop();
    dispatcher.join().unwrap();

    let recorder = recorder.lock().unwrap();
    assert_eq!(recorder.searches.len(), 2);
    assert_eq!(recorder.playlists.len(), 1);

    let playlist = &recorder.playlists[0];
    assert_eq!(playlist.name, "Classics");
    assert_eq!(playlist.tracks.len(), 1);
    assert_eq!(playlist.tracks[0].uri, "uri:bohemian");
    assert!(playlist.loaded);
}

#[tokio::test]
async fn unmatched_middle_row_preserves_relative_order() {
    let (recorder, dispatcher) = start(|session| {
        session
            .with_result("A", "first", vec![track("uri:1", "first", "A")])
            .with_result("C", "third", vec![track("uri:3", "third", "C")])
    });

    let rows = requests(&[("A", "first"), ("B", "missing"), ("C", "third")]);
    builder::build(&dispatcher, rows, "Ordered").await.unwrap();

    dispatcher.request_stop();
    dispatcher.join().unwrap();

    let recorder = recorder.lock().unwrap();
    let uris: Vec<&str> = recorder.playlists[0]
        .tracks
        .iter()
        .map(|t| t.uri.as_str())
        .collect();
    assert_eq!(uris, vec!["uri:1", "uri:3"]);
}

#[tokio::test]
async fn empty_input_creates_an_empty_playlist() {
    let (recorder, dispatcher) = start(|session| session);

    builder::build(&dispatcher, requests(&[]), "Empty")
        .await
        .unwrap();

    dispatcher.request_stop();
    dispatcher.join().unwrap();

    let recorder = recorder.lock().unwrap();
    assert!(recorder.searches.is_empty());
    assert_eq!(recorder.playlists.len(), 1);
    assert_eq!(recorder.playlists[0].name, "Empty");
    assert!(recorder.playlists[0].tracks.is_empty());
    assert!(recorder.playlists[0].loaded);
}

#[tokio::test]
async fn the_first_matched_track_is_selected() {
    let (recorder, dispatcher) = start(|session| {
        session.with_result(
            "Queen",
            "Under Pressure",
            vec![
                track("uri:original", "Under Pressure", "Queen"),
                track("uri:cover", "Under Pressure (cover)", "Somebody"),
            ],
        )
    });

    let rows = requests(&[("Queen", "Under Pressure")]);
    builder::build(&dispatcher, rows, "Singles").await.unwrap();

    dispatcher.request_stop();
    dispatcher.join().unwrap();

    let recorder = recorder.lock().unwrap();
    assert_eq!(recorder.playlists[0].tracks.len(), 1);
    assert_eq!(recorder.playlists[0].tracks[0].uri, "uri:original");
}

#[tokio::test]
async fn slow_searches_hold_the_builder_until_every_slot_loads() {
    // Each search takes well over one poll interval, so the wait loop must
    // observe genuinely unloaded slots and keep polling instead of racing
    // ahead of the worker.
    let delay = Duration::from_millis(250);
    let (recorder, dispatcher) = start(move |session| {
        session
            .with_search_delay(delay)
            .with_result("A", "first", vec![track("uri:1", "first", "A")])
            .with_result("B", "second", vec![track("uri:2", "second", "B")])
            .with_result("C", "third", vec![track("uri:3", "third", "C")])
    });

    let rows = requests(&[("A", "first"), ("B", "second"), ("C", "third")]);
    let started = Instant::now();
    builder::build(&dispatcher, rows, "Slow loads").await.unwrap();

    // Three sequential searches cannot resolve faster than their delays.
    assert!(started.elapsed() >= delay * 3);

    dispatcher.request_stop();
    dispatcher.join().unwrap();

    let recorder = recorder.lock().unwrap();
    let uris: Vec<&str> = recorder.playlists[0]
        .tracks
        .iter()
        .map(|t| t.uri.as_str())
        .collect();
    assert_eq!(uris, vec!["uri:1", "uri:2", "uri:3"]);
}

#[tokio::test]
async fn stored_position_fields_do_not_steer_slot_placement() {
    // Rows are matched to result slots by their order in the list; bogus
    // position values must neither panic the worker nor misplace results.
    let (recorder, dispatcher) = start(|session| {
        session
            .with_result("A", "first", vec![track("uri:1", "first", "A")])
            .with_result("B", "second", vec![track("uri:2", "second", "B")])
    });

    let rows = vec![
        TrackRequest {
            position: 99,
            artist: "A".to_string(),
            song: "first".to_string(),
        },
        TrackRequest {
            position: 0,
            artist: "B".to_string(),
            song: "second".to_string(),
        },
    ];
    builder::build(&dispatcher, rows, "Scrambled positions")
        .await
        .unwrap();

    dispatcher.request_stop();
    dispatcher.join().unwrap();

    let recorder = recorder.lock().unwrap();
    let uris: Vec<&str> = recorder.playlists[0]
        .tracks
        .iter()
        .map(|t| t.uri.as_str())
        .collect();
    assert_eq!(uris, vec!["uri:1", "uri:2"]);
}

#[tokio::test]
async fn every_row_is_searched_in_submission_order() {
    let (recorder, dispatcher) = start(|session| session);

    let rows = requests(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
    builder::build(&dispatcher, rows, "Order of searches")
        .await
        .unwrap();

    dispatcher.request_stop();
    dispatcher.join().unwrap();

    let recorder = recorder.lock().unwrap();
    let searched: Vec<&str> = recorder.searches.iter().map(|(a, _)| a.as_str()).collect();
    assert_eq!(searched, vec!["a", "b", "c", "d"]);
}
