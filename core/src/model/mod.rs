pub mod equipment;
pub mod maintenance;
pub mod summary;
