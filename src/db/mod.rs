//! Database persistence for finished runs and groups.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GroupRow, NewGroup, NewScore, ScoreRow};
pub use repository::{GroupCreation, MIGRATIONS, ScoreRepository};
