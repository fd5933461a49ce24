use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors producing the manifest document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize manifest")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
}
