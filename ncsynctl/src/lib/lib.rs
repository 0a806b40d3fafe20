pub mod storage;
pub mod sync;

pub use crate::sync::Synchronizer;
