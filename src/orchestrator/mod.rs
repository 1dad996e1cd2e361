//! Request orchestration

pub mod context;
pub mod prepare;

pub use context::ResolvedContext;
pub use prepare::RequestPreparer;
