//! Utility modules for afritalk
//!
//! Small helpers shared by the pipeline and the providers.

pub mod cancel;
pub mod mime;

pub use cancel::CancelHandle;
