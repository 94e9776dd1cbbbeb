//! Template rendering adapters.

mod builtin;
mod jinja;

pub use builtin::{BUILTIN_TEMPLATES, builtin_source};
pub use jinja::MiniJinjaRenderer;
