//! Mapstitch Core Types and Definitions
//!
//! This crate provides the foundational types for working with battlemap
//! documents. It includes:
//!
//! - **Geometry**: Grid-space points and sizes ([`geometry`] module)
//! - **Resolution**: Map placement and grid density ([`resolution::Resolution`])
//! - **Features**: Wall rings, portals, and light sources ([`feature`] module)
//! - **Documents**: A fully parsed battlemap ([`document::MapDocument`])
//! - **Rasters**: Encoded map images with format sniffing ([`raster`] module)

pub mod document;
pub mod feature;
pub mod geometry;
pub mod raster;
pub mod resolution;
