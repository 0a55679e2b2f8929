//! Domain-level constants.

// =============================================================================
// HTTP
// =============================================================================

/// Path of the user resource
pub const USER_PATH: &str = "/user";

/// Query parameter carrying the user identifier
pub const USER_ID_PARAM: &str = "id";

// =============================================================================
// Cache
// =============================================================================

/// Default cache TTL in seconds (1 hour)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// Render the cache key for a user id.
///
/// Keys are the bare decimal id with no namespace prefix.
pub fn user_cache_key(id: i64) -> String {
    id.to_string()
}
