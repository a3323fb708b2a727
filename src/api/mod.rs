//! # API Module
//!
//! HTTP endpoints served by the local callback server during `hebdo auth`.
//!
//! - [`callback`] - Receives the authorization code from Spotify and
//!   exchanges it, together with the PKCE verifier, for a token.
//! - [`health`] - Reports the server status and crate version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use hebdo::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
