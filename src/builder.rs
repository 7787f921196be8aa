//! Converts parsed CSV rows into a created remote playlist.
//!
//! One search task is queued per row; each task writes its outcome into a
//! write-once slot of a fixed-size results array. The caller polls the array
//! under a short sleep, reporting progress whenever the loaded count grows,
//! then selects the first matched track per row in original order and queues
//! a single playlist-creation task. Rows without matches are reported and
//! skipped; the relative order of matched rows is preserved.

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::{sync::oneshot, time::sleep};

use crate::{
    Res, dispatch::Dispatcher, info, session::SessionClient, success,
    types::{PlaylistSpec, TrackMatch, TrackRequest},
    warning,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One cell of the results array.
///
/// Written exactly once by the search task for its row, read by the polling
/// loop on the caller thread. The `OnceLock` supplies the memory-visibility
/// guarantee that makes the lock-free single-writer/single-reader pattern
/// sound: a slot observed as loaded always exposes its tracks, and it never
/// reverts to unloaded.
#[derive(Debug, Default)]
pub struct SearchSlot {
    outcome: OnceLock<Vec<TrackMatch>>,
}

impl SearchSlot {
    pub fn is_loaded(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Stores the matched tracks. Each slot has exactly one writer; a second
    /// fill would be a bug and is ignored rather than reverting the state.
    pub fn fill(&self, tracks: Vec<TrackMatch>) {
        let _ = self.outcome.set(tracks);
    }

    pub fn tracks(&self) -> Option<&[TrackMatch]> {
        self.outcome.get().map(|t| t.as_slice())
    }
}

/// Number of slots whose search has resolved.
pub fn count_loaded(slots: &[SearchSlot]) -> usize {
    slots.iter().filter(|s| s.is_loaded()).count()
}

/// Builds the playlist: search all rows, wait, match, create.
///
/// Zero rows is defined behavior: polling exits immediately and an empty
/// playlist is still created. Blocks until the creation task signaled the
/// playlist-created gate.
pub async fn build<S: SessionClient + 'static>(
    dispatcher: &Dispatcher<S>,
    requests: Vec<TrackRequest>,
    name: &str,
) -> Res<()> {
    let total = requests.len();
    let slots: Arc<Vec<SearchSlot>> = Arc::new((0..total).map(|_| SearchSlot::default()).collect());

    info!("Queuing {} searches", total);
    for (index, request) in requests.iter().enumerate() {
        let slots = Arc::clone(&slots);
        let artist = request.artist.clone();
        let song = request.song.clone();
        dispatcher.submit(Box::new(move |host| {
            let tracks = host.session.search(&artist, &song)?;
            slots[index].fill(tracks);
            Ok(())
        }));
    }

    if total > 0 {
        info!("Waiting for searches to complete...");
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.blue} {pos}/{len} searches ({percent}%)")
                .unwrap(),
        );

        let mut loaded = 0;
        while loaded < total {
            let count = count_loaded(&slots);
            // Recompute the progress report only when the count increased.
            if count > loaded {
                loaded = count;
                pb.set_position(loaded as u64);
            }
            if loaded < total {
                sleep(POLL_INTERVAL).await;
            }
        }
        pb.finish_and_clear();
        success!("{} of {} searches complete", total, total);
    }

    // Slots are addressed by row order, not by the stored position field,
    // so a hand-built request list cannot misplace results.
    let mut matches: Vec<TrackMatch> = Vec::new();
    for (index, request) in requests.iter().enumerate() {
        let tracks = slots[index].tracks().unwrap_or(&[]);
        match tracks.first() {
            Some(track) => matches.push(track.clone()),
            None => warning!(
                "No matches found for {} - {}...",
                request.artist,
                request.song
            ),
        }
    }

    info!("Creating playlist...");
    let spec = PlaylistSpec {
        name: name.to_string(),
        tracks: matches,
    };
    let (gate, wait) = oneshot::channel();
    dispatcher.submit(Box::new(move |host| {
        let playlist_id = host.session.create_playlist(&spec.name)?;
        host.session.add_tracks(&playlist_id, &spec.tracks)?;
        host.session.load_playlist(&playlist_id)?;
        let _ = gate.send(());
        Ok(())
    }));

    wait.await
        .map_err(|_| "playlist-created gate closed before completion")?;
    success!("Done!");
    Ok(())
}
