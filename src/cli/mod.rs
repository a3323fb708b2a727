//! # CLI Module
//!
//! Command implementations behind the `hebdo` binary.
//!
//! - [`run`] - Runs the weekly digest: loads the catalog files, refreshes the
//!   Spotify session, scans followed artists and shows, creates the weekly
//!   playlist, composes the report and emails it (or previews it on the
//!   console when mail is disabled).
//! - [`auth`] - One-time OAuth PKCE authorization that yields the refresh
//!   token used by every later run.
//!
//! ## Usage Patterns
//!
//! ```bash
//! hebdo auth                       # Authorize once, note the refresh token
//! hebdo run                        # Weekly job (e.g. from cron)
//! hebdo run --no-email             # Preview the digest on the console
//! hebdo run --catalog-dir ./lists  # Use another set of catalog files
//! ```
//!
//! Commands return [`crate::Res`]; the binary turns an error into a single
//! diagnostic line and a non-zero exit status.

mod auth;
mod run;

pub use auth::auth;
pub use run::preview;
pub use run::run;
