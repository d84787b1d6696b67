// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor panel implementations.

mod inspector;
pub mod property_drawer;

pub use inspector::InspectorPanel;
