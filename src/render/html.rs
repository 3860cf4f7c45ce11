//! Export-oriented HTML transforms.

use crate::render::engine::comrak_options;
use crate::theme::ThemeSettings;

/// Style-free sanitized HTML of `markdown`, for hosts that apply their own
/// styling. Raw HTML in the source is dropped rather than passed through.
pub fn plain_html(markdown: &str) -> String {
    let html = comrak::markdown_to_html(markdown, &comrak_options(false, false));
    ammonia::Builder::default().clean(&html).to_string()
}

/// Complete standalone document embedding an already-rendered body, carrying
/// the instance's typography and accent color inline.
pub fn document_html(body: &str, settings: &ThemeSettings) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head>\
         <body style=\"font-family:{};font-size:{};--md-primary:{};\">{}</body></html>",
        settings.font_family, settings.font_size, settings.primary_color, body
    )
}
