//! Built-in directive kinds.
//!
//! - [`ImageDirective`]: `name(path)` → `<img>` pointing at an asset host
//! - [`TemplateDirective`]: `name(arg)` → fixed HTML template with `{arg}` filled in

mod image;
mod template;

pub use image::ImageDirective;
pub use template::TemplateDirective;
