use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum MinemapError {
    IoError(std::io::Error),
    WorldError(String),
    RenderError(String),
}

impl fmt::Display for MinemapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinemapError::IoError(err) => write!(f, "IO error: {}", err),
            MinemapError::WorldError(msg) => write!(f, "World error: {}", msg),
            MinemapError::RenderError(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl Error for MinemapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MinemapError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MinemapError {
    fn from(err: std::io::Error) -> Self {
        MinemapError::IoError(err)
    }
}
