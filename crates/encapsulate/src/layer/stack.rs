// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Builds a callable from a tuple of layers and a root callback.
///
/// Automatically implemented for tuples of layers with the callback at the end, supporting up
/// to 12 layers. Layers apply outer to inner. A 1-tuple holding just the callback builds to the
/// callback itself.
pub trait Stack {
    /// The type of callable produced by this stack.
    type Callback;

    /// Builds the composed callable with all layers applied.
    fn build(self) -> Self::Callback;
}
