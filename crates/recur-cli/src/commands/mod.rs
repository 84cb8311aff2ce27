pub mod fields;
pub mod show;
pub mod snapshot;
