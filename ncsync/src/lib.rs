pub mod config;
pub mod path;

mod entry;
mod error;

pub use crate::config::Config;
pub use crate::entry::*;
pub use crate::error::*;

/// User agent sent to the hosting API
pub fn user_agent() -> String {
    format!("ncsync/{}", env!("CARGO_PKG_VERSION"))
}
