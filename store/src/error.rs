use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{message}")]
    Auth { message: String },

    #[error("store returned no rows for an insert")]
    EmptyReply,
}
