//! Request, response and provider-facing types

pub mod audio;
pub mod chat;
pub mod feedback;
pub mod generation;
pub mod media;
pub mod translate;

pub use audio::*;
pub use chat::*;
pub use feedback::*;
pub use generation::*;
pub use media::*;
pub use translate::*;
