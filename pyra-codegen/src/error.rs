use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors producing the entrypoint source.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing to generate: the load phase registered no functions.
    #[error("module contains no function registrations")]
    EmptyRegistry,

    #[error("failed to build the embedded manifest")]
    Manifest(#[from] pyra_manifest::Error),
}
