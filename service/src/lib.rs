//! Session boundary of the game: an explicit [`SessionStore`] injected into
//! [`GameService`], which creates, fetches and plays sessions by id.

pub use error::*;
pub use service::*;
pub use store::*;

mod api;
mod error;
mod service;
mod store;
