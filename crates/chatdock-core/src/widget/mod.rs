//! Widget presentation helpers: brand contrast and the embed tag.

pub mod color;
pub mod embed;

pub use color::contrast_color;
pub use embed::embed_snippet;
