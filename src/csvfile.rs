use std::path::Path;

use crate::{Res, types::TrackRequest};

/// Reads the whole input file into memory as an ordered list of requests.
///
/// Expected format: no header, two columns per row, columns = (artist, song),
/// surrounding whitespace trimmed. Anything beyond that is not validated.
pub fn load_requests(path: &Path) -> Res<Vec<TrackRequest>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut requests = Vec::new();
    for (position, record) in reader.records().enumerate() {
        let record = record?;
        let artist = record
            .get(0)
            .ok_or("CSV rows must have two columns: artist,song")?
            .to_string();
        let song = record
            .get(1)
            .ok_or("CSV rows must have two columns: artist,song")?
            .to_string();
        requests.push(TrackRequest {
            position,
            artist,
            song,
        });
    }
    Ok(requests)
}
