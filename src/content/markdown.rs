//! Markdown rendering through a caller-supplied renderer table
//!
//! A post body is parsed into a tree of [`RenderNode`]s and every node is
//! turned into markup by the handler registered for its [`NodeKind`] in a
//! [`RendererTable`]. Kinds without a handler use the default HTML rendering.
//!
//! Parsing never fails. Markdown that does not form a recognized construct
//! stays literal text, raw HTML is kept as (escaped) text, and a code fence
//! that is never closed runs to the end of the document.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use std::collections::HashMap;
use std::fmt;

use super::highlight::Highlighter;

/// A node of a parsed post body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Heading {
        level: u8,
        children: Vec<RenderNode>,
    },
    Paragraph {
        children: Vec<RenderNode>,
    },
    Link {
        href: String,
        title: Option<String>,
        children: Vec<RenderNode>,
    },
    InlineCode {
        text: String,
    },
    FencedCode {
        language: Option<String>,
        code: String,
    },
    Text {
        text: String,
    },
    Emphasis {
        children: Vec<RenderNode>,
    },
    Strong {
        children: Vec<RenderNode>,
    },
    Strikethrough {
        children: Vec<RenderNode>,
    },
    BlockQuote {
        children: Vec<RenderNode>,
    },
    List {
        /// First number of an ordered list, `None` for bullets
        start: Option<u64>,
        children: Vec<RenderNode>,
    },
    ListItem {
        children: Vec<RenderNode>,
    },
    Image {
        src: String,
        alt: String,
        title: Option<String>,
    },
    LineBreak,
    ThematicBreak,
}

/// Key of a renderer table entry; headings get one key per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Paragraph,
    Link,
    InlineCode,
    FencedCode,
    Text,
    Emphasis,
    Strong,
    Strikethrough,
    BlockQuote,
    List,
    ListItem,
    Image,
    LineBreak,
    ThematicBreak,
}

impl NodeKind {
    /// Kind for a heading level, clamped to 1..=6
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => NodeKind::Heading1,
            2 => NodeKind::Heading2,
            3 => NodeKind::Heading3,
            4 => NodeKind::Heading4,
            5 => NodeKind::Heading5,
            _ => NodeKind::Heading6,
        }
    }
}

impl RenderNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            RenderNode::Heading { level, .. } => NodeKind::heading(*level),
            RenderNode::Paragraph { .. } => NodeKind::Paragraph,
            RenderNode::Link { .. } => NodeKind::Link,
            RenderNode::InlineCode { .. } => NodeKind::InlineCode,
            RenderNode::FencedCode { .. } => NodeKind::FencedCode,
            RenderNode::Text { .. } => NodeKind::Text,
            RenderNode::Emphasis { .. } => NodeKind::Emphasis,
            RenderNode::Strong { .. } => NodeKind::Strong,
            RenderNode::Strikethrough { .. } => NodeKind::Strikethrough,
            RenderNode::BlockQuote { .. } => NodeKind::BlockQuote,
            RenderNode::List { .. } => NodeKind::List,
            RenderNode::ListItem { .. } => NodeKind::ListItem,
            RenderNode::Image { .. } => NodeKind::Image,
            RenderNode::LineBreak => NodeKind::LineBreak,
            RenderNode::ThematicBreak => NodeKind::ThematicBreak,
        }
    }

    /// Child nodes; leaves have none
    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Heading { children, .. }
            | RenderNode::Paragraph { children }
            | RenderNode::Link { children, .. }
            | RenderNode::Emphasis { children }
            | RenderNode::Strong { children }
            | RenderNode::Strikethrough { children }
            | RenderNode::BlockQuote { children }
            | RenderNode::List { children, .. }
            | RenderNode::ListItem { children } => children,
            _ => &[],
        }
    }

    /// Concatenated literal text of this node and its descendants
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            RenderNode::Text { text } | RenderNode::InlineCode { text } => out.push_str(text),
            RenderNode::FencedCode { code, .. } => out.push_str(code),
            RenderNode::Image { alt, .. } => out.push_str(alt),
            RenderNode::LineBreak => out.push('\n'),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }

    fn text(text: impl Into<String>) -> Self {
        RenderNode::Text { text: text.into() }
    }
}

/// Parse a markdown body into its top-level nodes
pub fn parse(markdown: &str) -> Vec<RenderNode> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
    let mut stack = vec![Frame::new(FrameTag::Root)];

    for event in parser {
        match event {
            Event::Start(tag) => stack.push(Frame::new(FrameTag::from_tag(tag))),
            Event::End(_) => {
                // Root is never popped by an End event: pulldown-cmark balances them
                if stack.len() < 2 {
                    continue;
                }
                if let Some(frame) = stack.pop() {
                    let parent = stack.last_mut().map(|f| &mut f.children);
                    if let Some(parent) = parent {
                        frame.close_into(parent);
                    }
                }
            }
            Event::Text(text) => push_current(&mut stack, RenderNode::text(text.to_string())),
            Event::Code(text) => push_current(
                &mut stack,
                RenderNode::InlineCode {
                    text: text.to_string(),
                },
            ),
            Event::Html(raw) | Event::InlineHtml(raw) => {
                push_current(&mut stack, RenderNode::text(raw.to_string()))
            }
            Event::SoftBreak => push_current(&mut stack, RenderNode::text("\n")),
            Event::HardBreak => push_current(&mut stack, RenderNode::LineBreak),
            Event::Rule => push_current(&mut stack, RenderNode::ThematicBreak),
            Event::FootnoteReference(label) => {
                push_current(&mut stack, RenderNode::text(format!("[^{}]", label)))
            }
            _ => {}
        }
    }

    // Unbalanced frames cannot happen with pulldown-cmark, but fold any
    // leftovers rather than drop content
    while stack.len() > 1 {
        if let Some(frame) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                frame.close_into(&mut parent.children);
            }
        }
    }

    stack.pop().map(|root| root.children).unwrap_or_default()
}

fn push_current(stack: &mut [Frame], node: RenderNode) {
    if let Some(frame) = stack.last_mut() {
        push_child(&mut frame.children, node);
    }
}

/// Append a node, merging adjacent text runs
fn push_child(children: &mut Vec<RenderNode>, node: RenderNode) {
    if let RenderNode::Text { text } = &node {
        if let Some(RenderNode::Text { text: last }) = children.last_mut() {
            last.push_str(text);
            return;
        }
    }
    children.push(node);
}

/// Open container while folding events into a tree
struct Frame {
    tag: FrameTag,
    children: Vec<RenderNode>,
}

enum FrameTag {
    Root,
    Heading(u8),
    Paragraph,
    Link { href: String, title: Option<String> },
    Emphasis,
    Strong,
    Strikethrough,
    BlockQuote,
    List(Option<u64>),
    ListItem,
    Image { src: String, title: Option<String> },
    Code { language: Option<String> },
    HtmlBlock,
    /// Containers without a node of their own; children are spliced into the parent
    Transparent,
}

impl FrameTag {
    fn from_tag(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Paragraph => FrameTag::Paragraph,
            Tag::Heading { level, .. } => FrameTag::Heading(level as u8),
            Tag::BlockQuote(_) => FrameTag::BlockQuote,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => FrameTag::Code {
                language: info
                    .split_whitespace()
                    .next()
                    .map(str::to_string),
            },
            Tag::CodeBlock(CodeBlockKind::Indented) => FrameTag::Code { language: None },
            Tag::List(start) => FrameTag::List(start),
            Tag::Item => FrameTag::ListItem,
            Tag::Emphasis => FrameTag::Emphasis,
            Tag::Strong => FrameTag::Strong,
            Tag::Strikethrough => FrameTag::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => FrameTag::Link {
                href: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::Image {
                dest_url, title, ..
            } => FrameTag::Image {
                src: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::HtmlBlock => FrameTag::HtmlBlock,
            _ => FrameTag::Transparent,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl Frame {
    fn new(tag: FrameTag) -> Self {
        Self {
            tag,
            children: Vec::new(),
        }
    }

    /// Turn the finished frame into a node and append it to `parent`
    fn close_into(self, parent: &mut Vec<RenderNode>) {
        let children = self.children;
        let node = match self.tag {
            FrameTag::Root | FrameTag::Transparent => {
                for child in children {
                    push_child(parent, child);
                }
                return;
            }
            FrameTag::Heading(level) => RenderNode::Heading { level, children },
            FrameTag::Paragraph => RenderNode::Paragraph { children },
            FrameTag::Link { href, title } => RenderNode::Link {
                href,
                title,
                children,
            },
            FrameTag::Emphasis => RenderNode::Emphasis { children },
            FrameTag::Strong => RenderNode::Strong { children },
            FrameTag::Strikethrough => RenderNode::Strikethrough { children },
            FrameTag::BlockQuote => RenderNode::BlockQuote { children },
            FrameTag::List(start) => RenderNode::List { start, children },
            FrameTag::ListItem => RenderNode::ListItem { children },
            FrameTag::Image { src, title } => RenderNode::Image {
                src,
                alt: children.iter().map(RenderNode::plain_text).collect(),
                title,
            },
            FrameTag::Code { language } => {
                let mut code: String = children.iter().map(RenderNode::plain_text).collect();
                if code.ends_with('\n') {
                    code.pop();
                    if code.ends_with('\r') {
                        code.pop();
                    }
                }
                RenderNode::FencedCode { language, code }
            }
            FrameTag::HtmlBlock => {
                let raw: String = children.iter().map(RenderNode::plain_text).collect();
                RenderNode::Paragraph {
                    children: vec![RenderNode::text(raw.trim_end())],
                }
            }
        };
        parent.push(node);
    }
}

/// Renders one node given the already-rendered markup of its children
pub type RenderFn = dyn Fn(&RenderNode, &str) -> String + Send + Sync;

/// Mapping from node kind to rendering function
///
/// Kinds without an entry use the default HTML rendering. Fenced code falls
/// back to syntax highlighting with the table's [`Highlighter`].
pub struct RendererTable {
    handlers: HashMap<NodeKind, Box<RenderFn>>,
    highlighter: Highlighter,
}

impl fmt::Debug for RendererTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererTable")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .field("highlighter", &self.highlighter)
            .finish()
    }
}

impl Default for RendererTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Classes for h1..h6 in the site table
const HEADING_CLASSES: [&str; 6] = [
    "text-4xl md:text-5xl font-bold tracking-tighter leading-tight md:pr-8 my-6",
    "text-3xl sm:text-4xl font-bold tracking-tight text-gray-900 text-left my-6",
    "text-2xl sm:text-3xl font-bold tracking-tight text-gray-900 text-left my-6",
    "text-xl sm:text-2xl font-bold tracking-tight text-gray-900 text-left my-6",
    "text-lg sm:text-xl font-bold tracking-tight text-gray-900 text-left my-6",
    "text-base sm:text-lg font-bold tracking-tight text-gray-900 text-left my-6",
];
const PARAGRAPH_CLASS: &str =
    "text-base sm:text-lg font-normal tracking-tight text-gray-900 text-left my-6";
const LINK_CLASS: &str = "text-sky-500 hover:underline";
const INLINE_CODE_CLASS: &str = "font-bold before:content-['`'] after:content-['`']";

impl RendererTable {
    /// Empty table: every kind renders with the default
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            highlighter: Highlighter::default(),
        }
    }

    /// Use a specific highlighter for the default fenced-code rendering
    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Register (or replace) the handler for a node kind
    pub fn with<F>(mut self, kind: NodeKind, handler: F) -> Self
    where
        F: Fn(&RenderNode, &str) -> String + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// The blog's own table: styled headings, paragraphs, links and inline code
    pub fn site(highlighter: Highlighter) -> Self {
        let mut table = Self::new().with_highlighter(highlighter);

        for (i, class) in HEADING_CLASSES.into_iter().enumerate() {
            let level = i + 1;
            table = table.with(NodeKind::heading(level as u8), move |_, children| {
                format!(r#"<h{0} class="{1}">{2}</h{0}>"#, level, class, children)
            });
        }

        table
            .with(NodeKind::Paragraph, |_, children| {
                format!(r#"<p class="{}">{}</p>"#, PARAGRAPH_CLASS, children)
            })
            .with(NodeKind::Link, |node, children| match node {
                RenderNode::Link { href, .. } => format!(
                    r#"<a href="{}" class="{}">{}</a>"#,
                    escape_html(href),
                    LINK_CLASS,
                    children
                ),
                _ => children.to_string(),
            })
            .with(NodeKind::InlineCode, |node, _| {
                format!(
                    r#"<code class="{}">{}</code>"#,
                    escape_html(INLINE_CODE_CLASS),
                    escape_html(&node.plain_text())
                )
            })
    }

    pub fn has_handler(&self, kind: NodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Render a single node and its subtree
    pub fn render_node(&self, node: &RenderNode) -> String {
        let children: String = node
            .children()
            .iter()
            .map(|child| self.render_node(child))
            .collect();

        match self.handlers.get(&node.kind()) {
            Some(handler) => handler(node, &children),
            None => self.render_default(node, &children),
        }
    }

    fn render_default(&self, node: &RenderNode, children: &str) -> String {
        match node {
            RenderNode::Heading { level, .. } => {
                let level = (*level).clamp(1, 6);
                format!("<h{0}>{1}</h{0}>", level, children)
            }
            RenderNode::Paragraph { .. } => format!("<p>{}</p>", children),
            RenderNode::Link { href, title, .. } => match title {
                Some(title) => format!(
                    r#"<a href="{}" title="{}">{}</a>"#,
                    escape_html(href),
                    escape_html(title),
                    children
                ),
                None => format!(r#"<a href="{}">{}</a>"#, escape_html(href), children),
            },
            RenderNode::InlineCode { text } => format!("<code>{}</code>", escape_html(text)),
            RenderNode::FencedCode { language, code } => {
                self.highlighter.highlight(code, language.as_deref())
            }
            RenderNode::Text { text } => escape_html(text),
            RenderNode::Emphasis { .. } => format!("<em>{}</em>", children),
            RenderNode::Strong { .. } => format!("<strong>{}</strong>", children),
            RenderNode::Strikethrough { .. } => format!("<del>{}</del>", children),
            RenderNode::BlockQuote { .. } => format!("<blockquote>{}</blockquote>", children),
            RenderNode::List { start: None, .. } => format!("<ul>{}</ul>", children),
            RenderNode::List {
                start: Some(1), ..
            } => format!("<ol>{}</ol>", children),
            RenderNode::List {
                start: Some(n), ..
            } => format!(r#"<ol start="{}">{}</ol>"#, n, children),
            RenderNode::ListItem { .. } => format!("<li>{}</li>", children),
            RenderNode::Image { src, alt, title } => match title {
                Some(title) => format!(
                    r#"<img src="{}" alt="{}" title="{}" />"#,
                    escape_html(src),
                    escape_html(alt),
                    escape_html(title)
                ),
                None => format!(
                    r#"<img src="{}" alt="{}" />"#,
                    escape_html(src),
                    escape_html(alt)
                ),
            },
            RenderNode::LineBreak => "<br />".to_string(),
            RenderNode::ThematicBreak => "<hr />".to_string(),
        }
    }
}

/// Render a markdown body into one fragment per top-level block
pub fn render(markdown: &str, table: &RendererTable) -> Vec<String> {
    parse(markdown)
        .iter()
        .map(|node| table.render_node(node))
        .collect()
}

/// Render a markdown body into a single HTML string
pub fn render_html(markdown: &str, table: &RendererTable) -> String {
    render(markdown, table).concat()
}

/// Simple HTML escaping
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RenderNode {
        RenderNode::Text {
            text: s.to_string(),
        }
    }

    #[test]
    fn test_empty_body() {
        assert!(parse("").is_empty());
        assert!(render("", &RendererTable::new()).is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn test_single_paragraph() {
        assert_eq!(
            parse("hello"),
            vec![RenderNode::Paragraph {
                children: vec![text("hello")]
            }]
        );
    }

    #[test]
    fn test_fenced_code_with_language() {
        assert_eq!(
            parse("```js\nconst x = 1;\n```"),
            vec![RenderNode::FencedCode {
                language: Some("js".to_string()),
                code: "const x = 1;".to_string()
            }]
        );
    }

    #[test]
    fn test_fenced_code_keeps_inner_blank_lines() {
        let nodes = parse("```\nline one\n\nline three\n\n```\n");
        assert_eq!(
            nodes,
            vec![RenderNode::FencedCode {
                language: None,
                code: "line one\n\nline three\n".to_string()
            }]
        );
    }

    #[test]
    fn test_fence_info_takes_first_word() {
        let nodes = parse("```rust ignore\nfn main() {}\n```");
        assert!(matches!(
            &nodes[0],
            RenderNode::FencedCode { language: Some(l), .. } if l == "rust"
        ));
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let nodes = parse("intro\n\n```python\nprint(1)\n\n# not a heading\n");
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            nodes[1],
            RenderNode::FencedCode {
                language: Some("python".to_string()),
                code: "print(1)\n\n# not a heading".to_string()
            }
        );
    }

    #[test]
    fn test_headings_all_levels() {
        let nodes = parse("# one\n## two\n### three\n#### four\n##### five\n###### six");
        let levels: Vec<_> = nodes
            .iter()
            .map(|n| match n {
                RenderNode::Heading { level, .. } => *level,
                _ => 0,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(nodes[2].kind(), NodeKind::Heading3);
        assert_eq!(nodes[5].plain_text(), "six");
    }

    #[test]
    fn test_inline_spans() {
        let nodes = parse("Use `npm i` and see [the docs](https://nextjs.org \"Next\").");
        assert_eq!(
            nodes,
            vec![RenderNode::Paragraph {
                children: vec![
                    text("Use "),
                    RenderNode::InlineCode {
                        text: "npm i".to_string()
                    },
                    text(" and see "),
                    RenderNode::Link {
                        href: "https://nextjs.org".to_string(),
                        title: Some("Next".to_string()),
                        children: vec![text("the docs")],
                    },
                    text("."),
                ]
            }]
        );
    }

    #[test]
    fn test_inline_spans_inside_heading() {
        let nodes = parse("## The `useReducer` hook");
        assert_eq!(
            nodes,
            vec![RenderNode::Heading {
                level: 2,
                children: vec![
                    text("The "),
                    RenderNode::InlineCode {
                        text: "useReducer".to_string()
                    },
                    text(" hook"),
                ]
            }]
        );
    }

    #[test]
    fn test_unrecognized_inline_is_literal() {
        assert_eq!(
            parse("see [docs]( and *half"),
            vec![RenderNode::Paragraph {
                children: vec![text("see [docs]( and *half")]
            }]
        );
    }

    #[test]
    fn test_raw_html_is_escaped_text() {
        let html = render_html("before <script>alert(1)</script> after", &RendererTable::new());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let block = render_html("<div>\nhi\n</div>", &RendererTable::new());
        assert!(block.starts_with("<p>&lt;div&gt;"));
    }

    #[test]
    fn test_one_fragment_per_block() {
        let out = render("# Title\n\nFirst.\n\nSecond.", &RendererTable::new());
        assert_eq!(out, vec!["<h1>Title</h1>", "<p>First.</p>", "<p>Second.</p>"]);
    }

    #[test]
    fn test_default_rendering() {
        let html = render_html(
            "Some *em*, **strong**, ~~gone~~ and [a](/x?a=1&b=2).\n\n- one\n- two\n\n3. three\n\n> quoted\n\n---\n\n![alt text](/img.png)",
            &RendererTable::new(),
        );
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains(r#"<a href="/x?a=1&amp;b=2">a</a>"#));
        assert!(html.contains("<ul><li>"));
        assert!(html.contains(r#"<ol start="3"><li>"#));
        assert!(html.contains("<blockquote><p>quoted</p></blockquote>"));
        assert!(html.contains("<hr />"));
        assert!(html.contains(r#"<img src="/img.png" alt="alt text" />"#));
    }

    #[test]
    fn test_default_fenced_code_is_highlighted() {
        let html = render_html("```js\nconst x = 1;\n```", &RendererTable::new());
        assert!(html.starts_with(r#"<figure class="highlight js">"#));
    }

    #[test]
    fn test_custom_handler_overrides_one_kind() {
        let table = RendererTable::new()
            .with(NodeKind::Heading2, |_, children| format!("<h2 class=\"x\">{}</h2>", children))
            .with(NodeKind::FencedCode, |node, _| match node {
                RenderNode::FencedCode { language, code } => {
                    format!("[{}:{}]", language.as_deref().unwrap_or("-"), code)
                }
                _ => String::new(),
            });

        let out = render("# One\n\n## Two\n\n```sh\nls\n```", &table);
        assert_eq!(out, vec!["<h1>One</h1>", "<h2 class=\"x\">Two</h2>", "[sh:ls]"]);
    }

    #[test]
    fn test_handler_receives_rendered_children() {
        let table = RendererTable::new()
            .with(NodeKind::Text, |node, _| node.plain_text().to_uppercase())
            .with(NodeKind::Paragraph, |_, children| format!("({})", children));
        assert_eq!(render_html("a `b` c", &table), "(A <code>b</code> C)");
    }

    #[test]
    fn test_site_table() {
        let table = RendererTable::site(Highlighter::default());
        assert!(table.has_handler(NodeKind::Heading6));
        assert!(!table.has_handler(NodeKind::FencedCode));

        let html = render_html("### Hooks\n\nRead [more](/posts/x) on `useState`.", &table);
        assert!(html.starts_with(&format!(r#"<h3 class="{}">Hooks</h3>"#, HEADING_CLASSES[2])));
        assert!(html.contains(r#"<a href="/posts/x" class="text-sky-500 hover:underline">more</a>"#));
        assert!(html.contains(">useState</code>"));
        assert!(html.contains(PARAGRAPH_CLASS));
    }

    #[test]
    fn test_soft_break_stays_in_text() {
        assert_eq!(
            parse("line one\nline two"),
            vec![RenderNode::Paragraph {
                children: vec![text("line one\nline two")]
            }]
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
