//! Server-rendered views.

mod engine;

pub use engine::{MiniJinjaEngine, TemplateEngine};
