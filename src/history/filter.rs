use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::types::FibboScoreRecord;

/// Keep only the newest row per entity and channel.
///
/// Rows are sorted newest first (stable, so equal dates keep input order)
/// and the first row seen for each `entity_channel` key wins.
pub fn latest_per_entity_channel(mut rows: Vec<FibboScoreRecord>) -> Vec<FibboScoreRecord> {
    rows.sort_by(|a, b| b.score_date.cmp(&a.score_date));

    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.entity_channel_key()))
        .collect()
}

/// Rows belonging to `project_id`; exports may mix several projects.
pub fn for_project(rows: Vec<FibboScoreRecord>, project_id: &str) -> Vec<FibboScoreRecord> {
    rows.into_iter()
        .filter(|row| row.project_id == project_id)
        .collect()
}

pub fn for_entity(rows: Vec<FibboScoreRecord>, entity_id: &str) -> Vec<FibboScoreRecord> {
    rows.into_iter()
        .filter(|row| row.entity_id == entity_id)
        .collect()
}

/// Load an exported JSON array of score rows.
pub fn load_records(path: &Path) -> Result<Vec<FibboScoreRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open score export at {}", path.display()))?;
    let rows: Vec<FibboScoreRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse score rows in {}", path.display()))?;
    Ok(rows)
}
