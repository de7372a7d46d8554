pub mod backends;

pub use backends::{DiskCache, MemoryCache};
