// Document generation and persistence

pub mod generator;
pub mod templates;
pub mod writer;

pub use generator::*;
pub use templates::TemplateEngine;
pub use writer::*;
