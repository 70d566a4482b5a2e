//! Router builder for the folio HTTP server

use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use folio_kernel::ModuleRegistry;

use crate::MakeRequestUuid;

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("/api/{}", module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware: stamp incoming requests with a generated
    /// id and echo it back on the response. The set layer must sit outside
    /// the propagate layer so the id exists by the time it is copied.
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Merge module OpenAPI fragments into one document, served raw at
    /// `/docs/openapi.json` and through Swagger UI at `/swagger-ui`.
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let mut spec = serde_json::json!({
            "openapi": "3.0.0",
            "info": {
                "title": "Folio API",
                "version": "1.0.0",
                "description": "In-memory book catalog API"
            },
            "paths": {
                "/healthz": {
                    "get": {
                        "summary": "Health check",
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "ErrorResponse": {
                        "type": "object",
                        "properties": {
                            "error": {
                                "type": "object",
                                "properties": {
                                    "code": { "type": "string" },
                                    "message": { "type": "string" },
                                    "details": { "type": "array", "items": {} },
                                    "trace_id": { "type": "string" },
                                    "timestamp": { "type": "string" }
                                },
                                "required": ["code", "message", "trace_id", "timestamp"]
                            }
                        },
                        "required": ["error"]
                    }
                }
            }
        });

        // Module routers are nested under /api/{name}; mirror that prefix
        // in the merged document.
        for module in registry.modules() {
            let Some(fragment) = module.openapi() else {
                continue;
            };

            if let Some(paths) = fragment.get("paths").and_then(|p| p.as_object()) {
                for (path, item) in paths {
                    spec["paths"][format!("/api/{}{}", module.name(), path)] = item.clone();
                }
            }

            if let Some(schemas) = fragment
                .pointer("/components/schemas")
                .and_then(|s| s.as_object())
            {
                for (name, schema) in schemas {
                    spec["components"]["schemas"][name] = schema.clone();
                }
            }
        }

        // SwaggerUI wants a typed utoipa document rather than raw JSON.
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(spec.clone())
            .unwrap_or_else(|_| {
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("Folio API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Raw JSON spec for external consumers.
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_builder_basic() {
        let router = RouterBuilder::new()
            .route("/test", get(|| async { "test" }))
            .build();

        let response = router
            .oneshot(Request::get("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_module_mounting() {
        let module_router = Router::new().route("/", get(|| async { "module" }));

        let router = RouterBuilder::new()
            .mount_module("test", module_router)
            .build();

        // A nested "/" is served at the bare prefix; there is no trailing
        // slash redirect.
        let response = router
            .oneshot(Request::get("/api/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_chain() {
        let router = RouterBuilder::new()
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .route("/health", get(|| async { "ok" }))
            .build();

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The generated request id must be propagated onto the response.
        let request_id = response
            .headers()
            .get("x-request-id")
            .expect("response is missing x-request-id");
        assert!(!request_id.is_empty());
    }

    #[tokio::test]
    async fn test_openapi_merges_module_fragments() {
        struct DocModule;

        #[async_trait::async_trait]
        impl folio_kernel::Module for DocModule {
            fn name(&self) -> &'static str {
                "books"
            }

            fn openapi(&self) -> Option<serde_json::Value> {
                Some(serde_json::json!({
                    "paths": {
                        "/": { "get": { "summary": "List books" } }
                    },
                    "components": {
                        "schemas": {
                            "Book": { "type": "object" }
                        }
                    }
                }))
            }
        }

        let mut registry = ModuleRegistry::new();
        registry.register(std::sync::Arc::new(DocModule));

        let router = RouterBuilder::new().with_openapi(&registry).build();
        let response = router
            .oneshot(
                Request::get("/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        // Module paths land under the /api/{name} mount prefix.
        assert!(doc["paths"]["/api/books/"].is_object());
        assert!(doc["paths"]["/healthz"].is_object());
        assert!(doc["components"]["schemas"]["Book"].is_object());
        assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
