//! Test doubles and helpers for the overlay workspace.
//!
//! Everything here targets the seams in `overlay-core`: scripted
//! [`client::StubClient`] / [`response::StubResponse`] doubles, a
//! deterministic [`clock::FrozenClock`], a tracing [`capture`] layer for
//! asserting on diagnostic events, and header [`assert`] helpers.

pub mod assert;
pub mod capture;
pub mod client;
pub mod clock;
pub mod response;
