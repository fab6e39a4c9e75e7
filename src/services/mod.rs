pub mod import;
pub mod scoring;

pub use import::ImportService;
pub use scoring::{ScoredItem, ScoringService};
