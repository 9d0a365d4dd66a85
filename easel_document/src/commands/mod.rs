// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete [`Command`](crate::Command)s.
//!
//! Commands that touch several layers keep one prior value per layer id, so
//! undo does not depend on the order in which layers were visited.

mod crop;
mod layer;

pub use crop::{CropComposition, CropRect};
pub use layer::{
    AddLayer, MoveLayers, RemoveLayer, SetLayerBlendMode, SetLayerOpacity, SetLayerTransform,
    SetLayerVisibility,
};
