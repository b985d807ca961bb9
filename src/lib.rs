//! Exploratory viewer for small numeric tables.
//!
//! The [`data`] layer loads rows, keeps per-feature statistics and reorders
//! or augments features; [`geometry`] turns each row into screen-space
//! points with the spiral, parallel-coordinate or perspective layout;
//! [`scene`] colors that geometry for the egui plot and for SVG export.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod geometry;
pub mod scene;
pub mod state;
pub mod ui;

pub use data::{Column, Dataset, Relation};
pub use error::DataError;
