//! Persistence layer flushing the in-memory store to a JSON snapshot file.

pub mod file_store;
pub mod storage;
