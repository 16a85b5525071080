// Core building blocks shared by Series and DataFrame
pub mod cache;

pub use cache::{CacheRoot, Cacher};
