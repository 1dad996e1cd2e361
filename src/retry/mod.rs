//! Retry module (ergonomic namespace)
//! - classify.rs: transient / fatal / aborted classification of errors
//! - policy.rs: exponential backoff policy and executor

pub mod classify;
pub mod policy;

pub use classify::*;
pub use policy::*;
