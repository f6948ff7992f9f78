// Service exports
pub mod cache;
pub mod directory;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use directory::{DirectoryClient, DirectoryError};
