//! Error management.

use derive_more::Display;

#[derive(Debug, Display, PartialEq)]
pub enum Error {
    #[display(fmt = "invalid argument: {}", _0)]
    InvalidArgument(String),
    #[display(fmt = "out of memory: cannot allocate {} bytes", _0)]
    OutOfMemory(usize),
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
