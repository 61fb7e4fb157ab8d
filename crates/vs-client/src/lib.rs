//! vs-client library
//!
//! Typed HTTP client for the auth, profile and resource backends.

pub(crate) mod client;

#[cfg(test)]
mod tests;

pub use client::{Client, ClientError, ClientResult};
