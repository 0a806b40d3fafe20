use std::{error, fmt, io};

use camino::FromPathBufError;

use crate::path::FsPathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path is not below the synchronization root
    Outside(FsPathBuf, FsPathBuf),
    Illegal(FsPathBuf, Option<String>),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outside(path, root) => write!(f, "'{path}' is not below '{root}'"),
            Self::Illegal(path, None) => write!(f, "Illegal path: {path}"),
            Self::Illegal(path, Some(reason)) => write!(f, "{reason}: {path}"),
        }
    }
}

impl error::Error for PathError {}

#[derive(Debug, Clone)]
pub enum Error {
    Path(PathError),
    Config(String),
    NotADirectory(FsPathBuf),
    Utf8(String),
    Io(String),
    Api(String),
    Other(String),
}

impl Error {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(..))
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(..))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(..))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(err) => err.fmt(f),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::NotADirectory(path) => write!(f, "'{path}' isn't a folder"),
            Self::Utf8(msg) => write!(f, "Non UTF-8 string: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Api(msg) => write!(f, "API error: {msg}"),
            Self::Other(msg) => f.write_str(msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Path(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PathError> for Error {
    fn from(value: PathError) -> Self {
        Self::Path(value)
    }
}

impl From<FromPathBufError> for Error {
    fn from(value: FromPathBufError) -> Self {
        Self::Utf8(value.as_path().as_os_str().to_string_lossy().to_string())
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value.to_string())
    }
}


pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! api_bail {
    ($($t:tt)*) => {
        return ::core::result::Result::Err($crate::Error::Api(format!($($t)*)))
    };
}

#[macro_export]
macro_rules! config_bail {
    ($($t:tt)*) => {
        return ::core::result::Result::Err($crate::Error::Config(format!($($t)*)))
    };
}

#[macro_export]
macro_rules! io_error {
    ($($t:tt)*) => {
        $crate::Error::Io(format!($($t)*))
    };
}

#[macro_export]
macro_rules! api_error {
    ($($t:tt)*) => {
        $crate::Error::Api(format!($($t)*))
    };
}

#[macro_export]
macro_rules! config_error {
    ($($t:tt)*) => {
        $crate::Error::Config(format!($($t)*))
    };
}

#[macro_export]
macro_rules! other_error {
    ($($t:tt)*) => {
        $crate::Error::Other(format!($($t)*))
    };
}
