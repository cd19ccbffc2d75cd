//! Infrastructure layer
//!
//! Concrete implementations of the domain ports: HTTP adapters built on
//! `reqwest` and the native image decoder built on `image`.

pub mod decoding;
pub mod http;
