//! Core types shared by the Packagist registry crates.
//!
//! - [`json`]: generic decoding of response bodies into typed shapes, plus
//!   field helpers for PHP-flavoured JSON.
//! - [`Package`]: the package reference returned by index listings.
//! - [`Error`]: decode and IO failures.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod json;
pub mod package;

pub use error::{Error, Result};
pub use json::{from_json, from_json_slice, to_json};
pub use package::Package;
