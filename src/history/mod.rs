pub mod filter;
pub mod types;

pub use filter::{for_entity, for_project, latest_per_entity_channel, load_records};
pub use types::FibboScoreRecord;
