use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid tags: {}", .invalid.join(", "))]
    InvalidTags { invalid: Vec<String>, available: Vec<String> },
    #[error("Parameter \"{name}\" is required")]
    MissingParameter { name: String, example: String },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Client error: {0}")]
    ClientError(#[from] detik_client::Error),
}
