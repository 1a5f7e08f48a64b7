//! Seed selection: the daily day-key clock, the deterministic daily pick,
//! uniform random picks, and curation of the daily list.

mod curate;
mod daily;
mod day_clock;
mod provider;
mod random;

pub use curate::{CuratedSeed, curate_seeds, neighbour_count};
pub use daily::{DailySeeds, day_hash};
pub use day_clock::DayClock;
pub use provider::LexitSeeds;
pub use random::RandomSeeds;
