pub mod presenter;
pub mod snapshot;
