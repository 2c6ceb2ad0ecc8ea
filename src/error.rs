use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("bad object key: {0}")]
    Key(#[from] objkey::Error),
    #[error("kube error: {0}")]
    Kube(#[from] kube::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}
pub type Result<T> = std::result::Result<T, Error>;
