pub mod history;
pub mod models;

pub use history::UserHistory;
pub use models::*;
