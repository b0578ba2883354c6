pub mod config;
pub mod document;
pub mod storage;

pub use config::StorageAppConfig;
