//! Inspection tools for object detection datasets.
//!
//! Draws COCO, OpenImages and YOLO sidecar boxes onto images, and finds
//! images duplicated across the category folders of an OpenImages download.

mod common;

pub mod coco;
pub mod config;
mod display;
pub mod duplicate;
pub mod filenames;
pub mod layout;
pub mod logging;
pub mod manifest;
pub mod open_images;
pub mod pipeline;
pub mod present;
pub mod render;
pub mod yolo;

pub use pipeline::{draw_coco, draw_open_images, find_duplicates, DrawSummary};
