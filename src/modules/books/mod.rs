pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use serde_json::json;

use folio_kernel::{InitCtx, Module};

use store::CatalogStore;

/// Books module: owns the in-memory catalog store and exposes its CRUD
/// surface under `/api/books`.
pub struct BooksModule {
    store: Arc<CatalogStore>,
}

impl BooksModule {
    pub fn new() -> Self {
        Self {
            store: Arc::new(CatalogStore::new()),
        }
    }

    /// Handle to the catalog store owned by this module.
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.catalog.seed_demo_data {
            self.store.seed_demo_data();
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            catalog_size = self.store.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_books).post(routes::create_book))
            .route(
                "/{id}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .route("/title/{title}", get(routes::get_book_by_title))
            .route("/health", get(health_check))
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books, optionally filtered by category, author, rating, or published date",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "category",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "author",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "rating",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "integer", "minimum": 1, "maximum": 5 }
                            },
                            {
                                "name": "published_date",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "integer", "minimum": 2000, "maximum": 2030 }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "List of books, possibly empty",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BookRequest"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created book with assigned id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            }
                        ],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BookRequest"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "204": {
                                "description": "Book replaced"
                            },
                            "404": {
                                "description": "No book with this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            }
                        ],
                        "responses": {
                            "204": {
                                "description": "Book deleted"
                            },
                            "404": {
                                "description": "No book with this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/title/{title}": {
                    "get": {
                        "summary": "Get a book by title (case-insensitive)",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "title",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The first book with this title",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with this title",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": {
                                            "type": "string"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "description": "Unique identifier assigned by the store"
                            },
                            "title": {
                                "type": "string",
                                "minLength": 3,
                                "description": "Title of the book"
                            },
                            "author": {
                                "type": "string",
                                "minLength": 1,
                                "description": "Author of the book"
                            },
                            "category": {
                                "type": "string",
                                "minLength": 1,
                                "description": "Category shelf the book belongs to"
                            },
                            "description": {
                                "type": "string",
                                "minLength": 1,
                                "maxLength": 100,
                                "description": "A brief description of the book"
                            },
                            "rating": {
                                "type": "integer",
                                "minimum": 1,
                                "maximum": 5,
                                "description": "Rating of the book"
                            },
                            "published_date": {
                                "type": "integer",
                                "minimum": 2000,
                                "maximum": 2030,
                                "description": "Year the book was published"
                            }
                        },
                        "required": ["id", "title", "author", "category", "description", "rating", "published_date"]
                    },
                    "BookRequest": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": "string",
                                "minLength": 3
                            },
                            "author": {
                                "type": "string",
                                "minLength": 1
                            },
                            "category": {
                                "type": "string",
                                "minLength": 1
                            },
                            "description": {
                                "type": "string",
                                "minLength": 1,
                                "maxLength": 100
                            },
                            "rating": {
                                "type": "integer",
                                "minimum": 1,
                                "maximum": 5
                            },
                            "published_date": {
                                "type": "integer",
                                "minimum": 2000,
                                "maximum": 2030
                            }
                        },
                        "required": ["title", "author", "category", "description", "rating", "published_date"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
