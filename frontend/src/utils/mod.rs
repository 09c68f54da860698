pub mod download;
pub mod format;
pub mod storage;
