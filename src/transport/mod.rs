pub mod client;
pub mod http;
pub mod types;

pub use client::{HttpTransport, RequestFailed};
pub use http::ReqwestTransport;
pub use types::{HttpRequest, Verb};
