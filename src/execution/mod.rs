//! Request execution: HTTP client construction, headers, interceptors and transport.

pub mod http;
