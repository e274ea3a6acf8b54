//! Core data model for the work log.
//!
//! These types describe what is tracked (work logs with their
//! repository branches and status) and how the collection is viewed
//! (search, filters, and sort).

mod query;
mod status;
mod work_log;

pub use query::{Query, RepoFilter, SortKey, SortOrder, StatusFilter};
pub use status::TaskStatus;
pub use work_log::{RepoBranch, WorkLog, WorkLogFormData, WorkLogPatch};
