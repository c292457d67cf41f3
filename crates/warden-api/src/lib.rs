mod adapter;
pub use adapter::ControllerAdapter;

mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod http;
pub use http::HttpApi;
