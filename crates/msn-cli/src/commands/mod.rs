pub mod create;
pub mod dispatch;
pub mod mcq;
pub mod plan;
pub mod pull;
pub mod push;
pub mod shared;
