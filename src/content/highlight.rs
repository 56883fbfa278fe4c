//! Syntax highlighting for fenced code blocks

use std::sync::LazyLock;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::markdown::escape_html;

// Loading the default sets is slow; do it once per process
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Default syntect theme
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Code highlighter bound to one syntect theme
#[derive(Debug, Clone)]
pub struct Highlighter {
    theme_name: String,
}

impl Highlighter {
    pub fn new(theme: &str) -> Self {
        Self {
            theme_name: theme.to_string(),
        }
    }

    /// Highlight a code block
    ///
    /// The language tag picks the grammar; unknown or missing tags fall back
    /// to plain text.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = SYNTAX_SET
            .find_syntax_by_token(lang)
            .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let theme = THEME_SET
            .themes
            .get(&self.theme_name)
            .or_else(|| THEME_SET.themes.get(DEFAULT_THEME));

        // highlighted_html_for_string wants the trailing newline of the block
        let mut source = code.to_string();
        if !source.ends_with('\n') {
            source.push('\n');
        }

        let highlighted = theme
            .and_then(|theme| highlighted_html_for_string(&source, &SYNTAX_SET, syntax, theme).ok());

        match highlighted {
            Some(html) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                escape_html(lang),
                html
            ),
            None => plain_code_block(code, lang),
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

/// Unhighlighted `<pre><code>` block
pub fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        escape_html(lang),
        escape_html(code)
    )
}
