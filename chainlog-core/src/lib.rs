pub mod commit;
pub mod error;
pub mod history;

pub use commit::{Commit, CommitId, CommitInfo};
pub use error::HistoryError;
pub use history::CommitHistory;
