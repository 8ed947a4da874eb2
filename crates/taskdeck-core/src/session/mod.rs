//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the token pair and the `{user, tokens}` credential payload

mod model;

pub use model::{AuthSession, AuthTokens};
