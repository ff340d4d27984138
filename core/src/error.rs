// orderform/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Problems found while loading or validating a catalog table.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog could not be parsed: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog file '{path}' could not be read: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate product id in catalog: {product_id}")]
    DuplicateProduct { product_id: String },

    #[error("Product '{product_id}' has a minimum order quantity of zero")]
    ZeroMinimum { product_id: String },

    #[error("Product '{product_id}' has quantity options that are not ascending positive integers")]
    InvalidQuantityOptions { product_id: String },

    #[error("Visibility rule '{rule}' references unknown product '{product_id}'")]
    UnknownProduct { rule: String, product_id: String },

    #[error("Default visibility list is empty")]
    EmptyDefaultVisibility,
}

/// Cart validation failures. These are user-correctable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("{product_name} requires a minimum order of {moq} (requested {requested})")]
    BelowMinimumOrderQuantity {
        product_id: String,
        product_name: String,
        moq: u32,
        requested: u64,
    },
}

/// The host session could not be acquired. Never fatal for the form.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Host session unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Outbound request failed: {source}")]
    Request {
        url: String,
        #[source]
        source: AnyhowError,
    },

    #[error("Transport could not be built: {0}")]
    Setup(String),
}

/// Everything that can stop a submission attempt.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Cart is empty; nothing to submit")]
    NothingToSubmit,

    #[error("A submission is already in flight")]
    AlreadySending,

    #[error("Order was already submitted")]
    AlreadyComplete,

    #[error("Form is still loading the host session")]
    NotReady,

    #[error("A signed-in user is required to submit orders")]
    IdentityRequired,

    #[error(transparent)]
    Validation(#[from] CartError),

    #[error("Order payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Submission rejected: {status} {body}")]
    Rejected { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
