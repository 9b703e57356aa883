// Modules for server components
pub mod api_routes;
pub mod web_ui;

// Re-export public APIs
pub use api_routes::api_router;
pub use web_ui::{WebUiConfig, WebUiServer};
