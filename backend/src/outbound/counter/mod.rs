//! Counter-store adapters backing the rate limiter.

mod memory;
mod redis;

pub use memory::InMemoryCounterStore;
pub use redis::RedisCounterStore;
