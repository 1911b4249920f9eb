// Domain layer modules
pub mod api_response;
pub mod item;
pub mod json_text;
pub mod request_error;

// Re-exports
pub use api_response::ApiResponse;
pub use item::Item;
pub use request_error::RequestError;
