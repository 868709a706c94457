mod cache;
mod classify;
mod resolve;

pub use cache::{cmd_cache_clear, cmd_cache_purge, cmd_caching_set, cmd_caching_status};
pub use classify::cmd_classify;
pub use resolve::{ResolveArgs, cmd_resolve};
