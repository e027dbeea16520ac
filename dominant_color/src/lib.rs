// THEORY:
// This file is the main entry point for the `dominant_color` library crate.
// It exposes the `ColorPipeline` and its configuration as the high-level interface
// for turning an image URL into a single UI accent color string.
//
// The engine is a strictly forward pipeline:
//   fetch bytes -> decode raster -> sample 8-bit colors -> median-cut quantize -> format
// Each stage lives in its own module and none of them reaches back into a later one.
// The pure stages (`core_modules`) are synchronous and side-effect free; only the
// fetcher touches the network.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod fetcher;
pub mod pipeline;

pub use config::PipelineConfig;
pub use core_modules::color::color::Color;
pub use core_modules::quantizer::quantizer::Quantizer;
pub use error::{ColorError, Result};
pub use fetcher::{HttpFetcher, ImageFetcher};
pub use pipeline::ColorPipeline;
