//! Tree construction from markdown and plain text.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::node::NodeRef;

/// Raw HTML block tags that become real (and therefore excludable) elements.
const RAW_BLOCK_TAGS: &[&str] = &["script", "style", "noscript"];

/// Builds a `body` element from markdown content.
pub fn build_markdown_tree(content: &str) -> NodeRef {
    let body = NodeRef::element("body");
    let mut stack = vec![body.clone()];
    let mut html_block: Option<String> = None;

    for event in Parser::new(content) {
        if let Some(raw) = html_block.as_mut() {
            match event {
                Event::Html(text) | Event::Text(text) => {
                    raw.push_str(&text);
                    continue;
                }
                Event::End(TagEnd::HtmlBlock) => {
                    let raw = html_block.take().unwrap_or_default();
                    if let Some(node) = html_block_node(&raw) {
                        current(&stack, &body).append(&node);
                    }
                    continue;
                }
                _ => {}
            }
        }

        match event {
            Event::Start(Tag::HtmlBlock) => html_block = Some(String::new()),
            Event::Start(tag) => {
                let element = NodeRef::element(element_tag(&tag));
                current(&stack, &body).append(&element);
                stack.push(element);
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Event::Text(text) => append_text(&current(&stack, &body), &text),
            Event::Code(text) => {
                let code = NodeRef::element("code").with_text(&text);
                current(&stack, &body).append(&code);
            }
            Event::SoftBreak => append_text(&current(&stack, &body), "\n"),
            Event::HardBreak => current(&stack, &body).append(&NodeRef::element("br")),
            Event::Rule => current(&stack, &body).append(&NodeRef::element("hr")),
            Event::FootnoteReference(label) => {
                append_text(&current(&stack, &body), &format!("[^{label}]"));
            }
            _ => {}
        }
    }

    body
}

/// Builds a `body` element from plain text, one paragraph per blank-line separated block.
pub fn build_text_tree(content: &str) -> NodeRef {
    let body = NodeRef::element("body");
    let mut block = String::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            flush_paragraph(&body, &mut block);
        } else {
            if !block.is_empty() {
                block.push('\n');
            }
            block.push_str(line);
        }
    }
    flush_paragraph(&body, &mut block);

    body
}

/// Appends the accumulated block as a paragraph, if any.
fn flush_paragraph(body: &NodeRef, block: &mut String) {
    if !block.is_empty() {
        body.append(&NodeRef::element("p").with_text(block));
        block.clear();
    }
}

/// The innermost open element.
fn current(stack: &[NodeRef], body: &NodeRef) -> NodeRef {
    stack.last().cloned().unwrap_or_else(|| body.clone())
}

/// Appends text, extending a trailing text node so adjacent text events stay one node.
fn append_text(parent: &NodeRef, text: &str) {
    if let Some(last) = parent.children().last()
        && let Some(existing) = last.text_value()
    {
        last.set_text_value(existing + text);
        return;
    }
    parent.append(&NodeRef::text(text));
}

/// Maps a markdown tag to an element tag name.
fn element_tag(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::Heading { level, .. } => heading_tag(*level),
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(Some(_)) => "ol",
        Tag::List(None) => "ul",
        Tag::Item => "li",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "del",
        Tag::Link { .. } => "a",
        Tag::Table(_) => "table",
        Tag::TableRow | Tag::TableHead => "tr",
        Tag::TableCell => "td",
        Tag::Image { .. } => "span",
        _ => "div",
    }
}

/// Maps a heading level to its tag.
fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Converts a raw HTML block into a node.
///
/// `<script>`, `<style>` and `<noscript>` blocks keep their tag and inner text so the scanner can
/// exclude them. Any other block becomes a `div` with its tags stripped.
fn html_block_node(raw: &str) -> Option<NodeRef> {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();

    for tag in RAW_BLOCK_TAGS {
        if lower.starts_with(&format!("<{tag}")) {
            let open_end = trimmed.find('>').map_or(trimmed.len(), |i| i + 1);
            let close_start = lower
                .rfind(&format!("</{tag}"))
                .filter(|&i| i >= open_end)
                .unwrap_or(trimmed.len());
            let inner = &trimmed[open_end..close_start];
            return Some(NodeRef::element(*tag).with_text(inner));
        }
    }

    let text = strip_tags(trimmed);
    if text.trim().is_empty() {
        None
    } else {
        Some(NodeRef::element("div").with_text(&text))
    }
}

/// Drops everything between `<` and `>`.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
