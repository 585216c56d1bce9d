//! OpenAPI documentation configuration

use axum_helpers::{ErrorResponse, HealthResponse};
use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        description = "Product catalog CRUD over PostgreSQL",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(crate::api::health::ready),
    components(schemas(HealthResponse, ErrorResponse)),
    modifiers(&ProductsDocs),
    tags(
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Products routes are mounted at the root, so their document is merged
/// rather than nested under a prefix.
struct ProductsDocs;

impl Modify for ProductsDocs {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        openapi.merge(domain_products::ApiDoc::openapi());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/ready", "/products", "/products/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }

        let schemas = &doc.components.as_ref().unwrap().schemas;
        for name in ["Product", "ProductPayload", "Category", "ErrorResponse"] {
            assert!(schemas.contains_key(name), "{name} missing");
        }
    }
}
