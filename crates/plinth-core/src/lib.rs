// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Plinth plugin discovery crates.
//!
//! Holds the error type returned by the fallible operations of the
//! discovery and configuration crates. Set operations themselves are total
//! and never produce these errors.

pub mod error;

pub use error::PlinthError;
