//! Constants shared between the HTTP surface and the processing pipeline.

/// The only media type accepted for video uploads unless overridden by configuration.
pub const DEFAULT_VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Multipart field carrying the video payload.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Issuer claim stamped on, and required from, access tokens.
pub const JWT_ISSUER: &str = "tubely-access";

/// Default upper bound for an uploaded video (1 GiB).
pub const DEFAULT_MAX_VIDEO_SIZE_MB: usize = 1024;

/// Default timeout applied to every ffprobe/ffmpeg invocation.
pub const DEFAULT_PROCESS_TIMEOUT_SECS: u64 = 300;
