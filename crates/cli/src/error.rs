//! Client error type.

use dashcart_core::stores::CheckoutError;
use dashcart_core::validation::ValidationErrors;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to the user by client commands.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Form input failed its field rules; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The server answered with an error body.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The server could not be reached or answered with something unreadable.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The command needs a logged-in user.
    #[error("Not logged in")]
    NotLoggedIn,

    /// No cart line or order with this id.
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
