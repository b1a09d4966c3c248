mod discovery;
mod index;

pub use discovery::DiscoveryError;
pub use index::IndexError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

pub type Result<T> = std::result::Result<T, Error>;
