pub mod redis;

pub use redis::{create_redis_client, Cache, CacheKey, CacheWriterHandle};
