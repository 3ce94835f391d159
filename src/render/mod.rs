//! Plain-text and HTML renderings of a persona.
//!
//! Both renderers are pure: the same persona and activity always produce
//! byte-identical output.

mod html;
mod text;

pub use html::render_html;
pub use text::render_text;
