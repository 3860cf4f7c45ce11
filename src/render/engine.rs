use comrak::{markdown_to_html, Options};

use crate::render::reading::{reading_time, ReadingTime};
use crate::theme::{default_theme, Theme, ThemeSettings, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};

/// Construction-time options for a [`MarkdownEngine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub theme: Theme,
    pub fonts: String,
    pub size: String,
    pub code_theme: &'static str,
    pub is_use_indent: bool,
    pub is_use_justify: bool,
    pub is_mac_code_block: bool,
    pub is_show_line_number: bool,
}

impl EngineOptions {
    /// Fixed typography used by the process-wide render cache.
    pub fn defaults() -> Self {
        Self {
            theme: default_theme().clone(),
            fonts: DEFAULT_FONT_FAMILY.to_string(),
            size: DEFAULT_FONT_SIZE.to_string(),
            code_theme: "atom-one-dark",
            is_use_indent: false,
            is_use_justify: false,
            is_mac_code_block: true,
            is_show_line_number: false,
        }
    }

    pub fn from_settings(settings: &ThemeSettings) -> Self {
        Self {
            theme: settings.resolved_theme().clone(),
            fonts: settings.font_family.clone(),
            size: settings.font_size.clone(),
            code_theme: settings.code_theme,
            is_use_indent: settings.is_use_indent,
            is_use_justify: settings.is_use_justify,
            is_mac_code_block: settings.is_mac_code_block,
            is_show_line_number: settings.is_show_line_number,
        }
    }
}

/// Per-render toggles, re-read from the owning instance on every render.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderFlags {
    pub is_cite_status: bool,
    pub legend: bool,
    pub is_use_indent: bool,
    pub is_use_justify: bool,
    pub is_count_status: bool,
    pub is_mac_code_block: bool,
    pub is_show_line_number: bool,
}

impl RenderFlags {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        Self {
            is_cite_status: settings.is_cite_status,
            legend: settings.legend,
            is_use_indent: settings.is_use_indent,
            is_use_justify: settings.is_use_justify,
            is_count_status: settings.is_count_status,
            is_mac_code_block: settings.is_mac_code_block,
            is_show_line_number: settings.is_show_line_number,
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub html: String,
    pub reading_time: ReadingTime,
}

pub(crate) fn comrak_options(legend: bool, allow_raw_html: bool) -> Options<'static> {
    let mut options = Options::default();

    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.r#unsafe = allow_raw_html;
    render.figure_with_caption = legend;

    options
}

/// Markdown → styled-HTML engine.
///
/// Built once from a theme and typography options; every render is a pure
/// function of the markdown text and the per-render flags. The engine holds
/// no mutable state.
pub struct MarkdownEngine {
    options: EngineOptions,
}

impl MarkdownEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn theme_key(&self) -> &'static str {
        self.options.theme.key
    }

    pub fn render(&self, markdown: &str, flags: &RenderFlags) -> RenderResult {
        let reading = reading_time(markdown);

        let html = markdown_to_html(markdown, &comrak_options(flags.legend, true));
        let mut body = self.stylize(&html, flags);

        if flags.is_cite_status {
            self.append_citations(&mut body);
        }
        if flags.is_count_status {
            self.append_word_count(&mut body, &reading);
        }

        let html = format!(
            "<section class=\"mdbridge-output\" style=\"font-family:{};font-size:{};\">{}</section>",
            self.options.fonts, self.options.size, body
        );

        RenderResult {
            html,
            reading_time: reading,
        }
    }

    /// Fold the theme's inline styles into the rendered markup.
    fn stylize(&self, html: &str, flags: &RenderFlags) -> String {
        let theme = &self.options.theme;

        let mut paragraph = theme.paragraph.to_string();
        if flags.is_use_indent {
            paragraph.push_str("text-indent:2em;");
        }
        if flags.is_use_justify {
            paragraph.push_str("text-align:justify;");
        }

        let mut out = html.to_string();
        for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            out = out.replace(
                &format!("<{tag}>"),
                &format!("<{tag} style=\"{}\">", theme.heading),
            );
        }
        out = out.replace("<p>", &format!("<p style=\"{paragraph}\">"));
        out = out.replace(
            "<blockquote>",
            &format!("<blockquote style=\"{}\">", theme.blockquote),
        );

        self.stylize_code_blocks(&out, flags)
    }

    fn stylize_code_blocks(&self, html: &str, flags: &RenderFlags) -> String {
        let mut out = String::with_capacity(html.len());
        let mut rest = html;

        while let Some(start) = rest.find("<pre") {
            let Some(close) = rest[start..].find("</pre>") else {
                break;
            };
            let end = start + close + "</pre>".len();
            out.push_str(&rest[..start]);
            out.push_str(&self.decorate_code_block(&rest[start..end], flags));
            rest = &rest[end..];
        }

        out.push_str(rest);
        out
    }

    fn decorate_code_block(&self, block: &str, flags: &RenderFlags) -> String {
        let theme = &self.options.theme;

        let mut styled = block.replacen(
            "<pre",
            &format!(
                "<pre class=\"code-{}\" style=\"{}\"",
                self.options.code_theme, theme.code_block
            ),
            1,
        );

        if flags.is_show_line_number {
            styled = number_code_lines(&styled);
        }

        if flags.is_mac_code_block {
            format!(
                "<div class=\"mac-code-block\">\
                 <span class=\"mac-dot\" style=\"color:#ff5f56;\">\u{25cf}</span>\
                 <span class=\"mac-dot\" style=\"color:#ffbd2e;\">\u{25cf}</span>\
                 <span class=\"mac-dot\" style=\"color:#27c93f;\">\u{25cf}</span>\
                 {styled}</div>"
            )
        } else {
            styled
        }
    }

    /// Appends a references section listing every link in the rendered body.
    fn append_citations(&self, body: &mut String) {
        let mut links: Vec<(String, String)> = Vec::new();
        let mut rest = body.as_str();

        while let Some(pos) = rest.find("<a href=\"") {
            rest = &rest[pos + "<a href=\"".len()..];
            let Some(href_end) = rest.find('"') else { break };
            let href = rest[..href_end].to_string();

            let Some(text_start) = rest.find('>') else { break };
            let after = &rest[text_start + 1..];
            let Some(text_end) = after.find("</a>") else { break };
            links.push((after[..text_end].to_string(), href));
            rest = &after[text_end..];
        }

        if links.is_empty() {
            return;
        }

        let theme = &self.options.theme;
        body.push_str(&format!(
            "<h4 style=\"{}\">References</h4><ol class=\"citations\">",
            theme.heading
        ));
        for (text, href) in links {
            body.push_str(&format!("<li>{text}: <i>{href}</i></li>"));
        }
        body.push_str("</ol>");
    }

    fn append_word_count(&self, body: &mut String, reading: &ReadingTime) {
        body.push_str(&format!(
            "<p class=\"word-count\" style=\"color:#999;font-size:0.8em;\">{} words \u{00b7} {} min read</p>",
            reading.words, reading.minutes
        ));
    }
}

/// Wrap each line of the block's `<code>` payload in a numbered span.
fn number_code_lines(block: &str) -> String {
    let Some(code_open) = block.find("<code") else {
        return block.to_string();
    };
    let Some(payload_start) = block[code_open..].find('>').map(|i| code_open + i + 1) else {
        return block.to_string();
    };
    let Some(payload_end) = block[payload_start..]
        .find("</code>")
        .map(|i| payload_start + i)
    else {
        return block.to_string();
    };

    let mut numbered = String::new();
    for (i, line) in block[payload_start..payload_end]
        .trim_end_matches('\n')
        .split('\n')
        .enumerate()
    {
        numbered.push_str(&format!(
            "<span class=\"code-line\" data-line=\"{}\">{line}</span>\n",
            i + 1
        ));
    }

    format!(
        "{}{}{}",
        &block[..payload_start],
        numbered,
        &block[payload_end..]
    )
}
