pub mod entry;
pub mod task;

pub use entry::TimeEntry;
pub use task::TaskCatalog;
