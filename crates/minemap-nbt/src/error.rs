use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;
use std::io;
use std::string::FromUtf8Error;

/// Errors produced while decoding a tag stream.
#[derive(Debug)]
pub enum NbtError {
    /// The stream ended before the current tag was fully read.
    UnexpectedEof,
    Io(io::Error),
    OutOfMemory,
    /// A length or type field held a value the format does not allow.
    Malformed(String),
    InvalidText(FromUtf8Error),
}

impl fmt::Display for NbtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NbtError::UnexpectedEof => write!(f, "unexpected end of input"),
            NbtError::Io(err) => write!(f, "read error: {}", err),
            NbtError::OutOfMemory => write!(f, "out of memory"),
            NbtError::Malformed(msg) => write!(f, "malformed input: {}", msg),
            NbtError::InvalidText(err) => write!(f, "invalid text payload: {}", err),
        }
    }
}

impl Error for NbtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NbtError::Io(err) => Some(err),
            NbtError::InvalidText(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for NbtError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            NbtError::UnexpectedEof
        } else {
            NbtError::Io(err)
        }
    }
}

impl From<FromUtf8Error> for NbtError {
    fn from(err: FromUtf8Error) -> Self {
        NbtError::InvalidText(err)
    }
}

impl From<TryReserveError> for NbtError {
    fn from(_: TryReserveError) -> Self {
        NbtError::OutOfMemory
    }
}
