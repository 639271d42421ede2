/// Prefix for all JSON API routes.
pub const API_PREFIX: &str = "/api";

/// URL path under which the local storage backend's directory is served.
pub const ASSETS_ROUTE: &str = "/assets";

/// Headroom on top of the video size limit for multipart boundaries and headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
