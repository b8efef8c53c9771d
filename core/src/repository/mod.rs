pub mod file;
pub mod traits;

// Re-export
pub use file::{FileRecordSource, MaintenanceStore};
pub use traits::RecordSource;
