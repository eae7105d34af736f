// SPDX-License-Identifier: MPL-2.0
//! Editor sub-states: filter staging and the crop and watermark tools.

pub mod crop;
pub mod filter;
pub mod watermark;

pub use crop::{CropDragState, CropState, HandlePosition};
pub use filter::FilterSession;
pub use watermark::WatermarkState;
