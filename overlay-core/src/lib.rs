#![warn(missing_docs)]
//! # overlay-core
//!
//! Core traits and types for the Overlay HTTP response-decoration layer.
//!
//! This crate defines the narrow contract the decorator in `overlay` is
//! written against, keeping it **transport-agnostic**: any HTTP client can
//! sit underneath, from a production transport to the scripted doubles in
//! `overlay-test`.
//!
//! ## Capability seams
//!
//! - [`Client`] — dispatches requests and hands out responses
//! - [`Response`] — lazy accessors over a single in-flight response
//! - [`Clock`] — time source for header factories
//!
//! ## Error taxonomy
//!
//! Read paths surface [`ResponseError`] (transport, status-class, and
//! decoding failures); client operations surface [`ClientError`], which adds
//! the catch-all kind raised by inner client implementations.

pub mod client;
pub mod clock;
pub mod error;
pub mod response;

pub use client::{Client, RequestOptions};
pub use clock::{Clock, SystemClock};
pub use error::{ClientError, ResponseError};
pub use response::Response;
