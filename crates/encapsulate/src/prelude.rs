// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Common imports for working with encapsulation chains.
//!
//! Re-exports the most commonly used types from [`encapsulate`][crate].

pub use crate::layer::{Layer, Stack};
pub use crate::signature::Introspect;
pub use crate::{Callback, Encapsulator, Params};
