pub mod color;
pub mod formatter;
pub mod quantizer;
pub mod sampler;
pub mod utils;
