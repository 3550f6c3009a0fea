pub mod message;
pub mod snapshot;
