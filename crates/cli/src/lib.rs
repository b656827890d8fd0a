//! Interactive console front end for the inventory store.
//!
//! All prompting, input parsing and rendering lives here; the store itself
//! never prints.

pub mod input;
pub mod render;
pub mod session;

pub use session::{Session, SessionError};
