//! Error Handling Module
//!
//! This module provides the error taxonomy for the Kaizen client, including:
//! - Core error types (`KaizenError`, `ErrorCategory`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust
//! use kaizen_client::error::{ErrorCategory, KaizenError};
//!
//! let error = KaizenError::api_error(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
