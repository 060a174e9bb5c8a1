// Cache module for the local repository cache.
// Persists the normalized pinned repository list so reruns skip the network.

pub mod store;

pub use store::{read_cache, write_cache, write_text};
