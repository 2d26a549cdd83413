//! HAL (Hypertext Application Language) resources for Rust.
//!
//! This crate models the three building blocks of a
//! [HAL document](https://tools.ietf.org/html/draft-kelly-json-hal-08):
//!
//! - [`HalLink`], a link object,
//! - [`HalResource`], a resource with `_links`, `_embedded` and its own state,
//! - [`OneOrMany`], the "single object or array" shape HAL uses for every rel.
//!
//! All three implement [`serde::Serialize`] and [`serde::Deserialize`], so a
//! resource can be written to or read from any `serde_json` entrypoint. The
//! [`hal!`] and [`hal_extend!`] macros offer a compact way to build one.

pub mod curie;
pub mod error;
pub mod link;
mod macros;
pub mod one_or_many;
pub mod resource;

pub use crate::link::HalLink;
pub use crate::one_or_many::OneOrMany;
pub use crate::resource::HalResource;
