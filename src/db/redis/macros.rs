/// Read-through caching for catalog lookups.
///
/// Checks the cache for `$key`; on a miss runs `$block`, queues the result
/// for caching with a `$ttl`-second lifetime, and returns it. Cache read
/// failures count as misses, so a degraded Redis never fails the lookup
/// itself — only an upstream error from `$block` propagates.
///
/// # Example
/// ```rust,ignore
/// cached!(self.cache, key, SEARCH_CACHE_TTL, async {
///     self.get_json("search/multi", &[("query", query)]).await
/// })
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(hit) = $cache.get(&$key).await {
            Ok(hit)
        } else {
            let value = $block.await?;
            $cache.put_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
