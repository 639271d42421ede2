//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Upload videos, rewrite them for fast start and publish them to object storage."
    ),
    paths(
        handlers::health::liveness_check,
        handlers::video_upload::upload_video,
    ),
    components(schemas(tubely_core::VideoRecord, error::ErrorResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "videos", description = "Video upload"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_upload_route() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/video_upload/{video_id}"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
