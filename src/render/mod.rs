//! Rendering module for turning document trees into output formats.

mod json;
mod markdown;
mod options;
mod registry;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use registry::{DocumentRenderer, MarkdownFormat, RendererRegistry, TextFormat};
pub use result::{DocumentStats, RenderResult};
pub use text::to_text;
