//! Persistence lifecycle hooks for transparent field encryption.
//!
//! The host persistence layer calls [`FieldInterceptor::before_save`] before
//! committing any insert/update and [`FieldInterceptor::after_load`] after a
//! record materializes from storage. Between those two calls, sensitive
//! fields exist in storage only as authenticated envelopes; in memory they
//! are plaintext.

mod interceptor;

pub use interceptor::FieldInterceptor;
