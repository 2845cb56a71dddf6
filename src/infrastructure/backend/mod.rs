//! Backend access - HTTP transport and typed client

pub mod client;
pub mod http_client;

pub use client::ConsoleClient;
pub use http_client::{ApiRequest, HttpClient, HttpTransport, RawResponse, RequestBody};

#[cfg(test)]
pub use http_client::mock;
