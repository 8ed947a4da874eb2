pub mod auth;
pub mod tasks;

use taskdeck_core::error::TaskdeckError;

/// Turns a client failure into the user-facing text the binding layer owes
/// the terminal.
pub(crate) fn friendly(err: TaskdeckError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}
