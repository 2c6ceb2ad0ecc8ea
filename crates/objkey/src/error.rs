use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("object has no name")]
    MissingName,
    #[error("{field} {value:?} contains key separator")]
    ContainsSeparator { field: &'static str, value: String },
    #[error("unexpected key format: {0:?}")]
    Malformed(String),
}
pub type Result<T> = std::result::Result<T, Error>;
