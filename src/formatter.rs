//! Model reply to HTML rendering
//!
//! A lightweight, best-effort renderer for the markdown-ish text models
//! produce. It is an ordered pipeline of pure string stages:
//!
//! 1. [`escape_html`]
//! 2. [`format_bold`]
//! 3. [`format_italic`]
//! 4. [`format_inline_code`]
//! 5. [`format_code_blocks`]
//! 6. [`format_ordered_lists`]
//! 7. [`format_unordered_lists`]
//! 8. [`format_paragraphs`]
//! 9. [`format_line_breaks`]
//!
//! Escaping runs first and unconditionally, so every tag in the output was
//! produced by a later stage. Code blocks are handled after inline code,
//! which means a fenced block is usually consumed by the inline-code stage
//! before the fenced stage sees it.
//!
//! This is not a markdown parser; nesting is not validated.

use regex::Regex;
use std::sync::OnceLock;

macro_rules! static_regex {
    ($pattern:expr) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pattern).expect("formatter pattern is valid"))
    }};
}

/// A single rendering stage
pub type Stage = fn(&str) -> String;

/// Stages in the order [`format_reply`] applies them
pub const STAGES: [(&str, Stage); 9] = [
    ("escape", escape_html),
    ("bold", format_bold),
    ("italic", format_italic),
    ("inline_code", format_inline_code),
    ("code_blocks", format_code_blocks),
    ("ordered_lists", format_ordered_lists),
    ("unordered_lists", format_unordered_lists),
    ("paragraphs", format_paragraphs),
    ("line_breaks", format_line_breaks),
];

/// Render raw model text as HTML that is safe to insert into a page
///
/// # Examples
///
/// ```
/// use flashgate::formatter::format_reply;
///
/// assert_eq!(
///     format_reply("**bold** and *italic*"),
///     "<strong>bold</strong> and <em>italic</em>"
/// );
/// assert_eq!(format_reply("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
/// ```
pub fn format_reply(text: &str) -> String {
    STAGES
        .iter()
        .fold(text.to_string(), |acc, (_, stage)| stage(&acc))
}

/// Escape `&`, `<`, `>`, `"` and `'`
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `**x**` and `__x__` become `<strong>x</strong>`
pub fn format_bold(text: &str) -> String {
    let text = static_regex!(r"(?R)\*\*(.+?)\*\*").replace_all(text, "<strong>${1}</strong>");
    static_regex!(r"(?R)__(.+?)__")
        .replace_all(&text, "<strong>${1}</strong>")
        .into_owned()
}

/// `*x*` and `_x_` become `<em>x</em>`
///
/// Must run after [`format_bold`] so double delimiters are already consumed.
pub fn format_italic(text: &str) -> String {
    let text = static_regex!(r"(?R)\*(.+?)\*").replace_all(text, "<em>${1}</em>");
    static_regex!(r"(?R)_(.+?)_")
        .replace_all(&text, "<em>${1}</em>")
        .into_owned()
}

/// `` `x` `` becomes `<code>x</code>`
pub fn format_inline_code(text: &str) -> String {
    static_regex!(r"`([^`]+)`")
        .replace_all(text, "<code>${1}</code>")
        .into_owned()
}

/// ```` ```x``` ```` becomes `<pre><code>x</code></pre>`
pub fn format_code_blocks(text: &str) -> String {
    static_regex!(r"```([\s\S]+?)```")
        .replace_all(text, "<pre><code>${1}</code></pre>")
        .into_owned()
}

/// `1. x` lines become list items; the items are wrapped once in `<ol>`
///
/// The wrapper spans from the first item to the last one in the text.
pub fn format_ordered_lists(text: &str) -> String {
    let items = static_regex!(r"(?mR)^[0-9]+\.\s+(.+)$").replace_all(text, "<li>${1}</li>");
    static_regex!(r"(?s)(<li>.*</li>)")
        .replace(&items, "<ol>${1}</ol>")
        .into_owned()
}

/// `- x` and `• x` lines become list items wrapped once in `<ul>`
///
/// The wrapper is skipped when the item span sits inside an `<ol>` wrapper
/// or contains one.
pub fn format_unordered_lists(text: &str) -> String {
    let items = static_regex!(r"(?mR)^[-•]\s+(.+)$").replace_all(text, "<li>${1}</li>");

    let Some(span) = static_regex!(r"(?s)<li>.*</li>").find(&items) else {
        return items.into_owned();
    };

    if items[..span.start()].ends_with("<ol>") || span.as_str().contains("<ol>") {
        return items.into_owned();
    }

    format!(
        "{}<ul>{}</ul>{}",
        &items[..span.start()],
        span.as_str(),
        &items[span.end()..]
    )
}

/// Blank-line separated blocks become `<p>` elements when there is more than one
pub fn format_paragraphs(text: &str) -> String {
    let blocks: Vec<&str> = static_regex!(r"\n\n+").split(text).collect();
    if blocks.len() <= 1 {
        return text.to_string();
    }

    blocks
        .iter()
        .map(|block| format!("<p>{}</p>", block.trim()))
        .collect()
}

/// Remaining newlines become `<br>`
pub fn format_line_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let names: Vec<&str> = STAGES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "escape",
                "bold",
                "italic",
                "inline_code",
                "code_blocks",
                "ordered_lists",
                "unordered_lists",
                "paragraphs",
                "line_breaks"
            ]
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"Tom & Jerry's "show" <now>"#),
            "Tom &amp; Jerry&#39;s &quot;show&quot; &lt;now&gt;"
        );
    }

    #[test]
    fn test_injected_markup_is_escaped() {
        let html = format_reply("<img src=x onerror=alert(1)>");
        assert!(!html.contains("<img"));
        assert_eq!(html, "&lt;img src=x onerror=alert(1)&gt;");

        let html = format_reply("<script>alert('x')</script>");
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_markup_inside_bold_is_still_escaped() {
        let html = format_reply("**<i>x</i>**");
        assert_eq!(html, "<strong>&lt;i&gt;x&lt;/i&gt;</strong>");
    }

    #[test]
    fn test_bold_and_italic_do_not_mis_nest() {
        assert_eq!(
            format_reply("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
        assert_eq!(
            format_reply("__bold__ and _italic_"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        assert_eq!(format_bold("**a\nb**"), "**a\nb**");
    }

    #[test]
    fn test_underscores_in_identifiers_become_italic() {
        assert_eq!(format_italic("snake_case_name"), "snake<em>case</em>name");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            format_reply("Run `cargo build` now"),
            "Run <code>cargo build</code> now"
        );
    }

    #[test]
    fn test_code_block_stage_alone() {
        assert_eq!(
            format_code_blocks("```let x = 1;```"),
            "<pre><code>let x = 1;</code></pre>"
        );
    }

    #[test]
    fn test_fenced_block_is_consumed_by_inline_code_first() {
        assert_eq!(format_reply("```code```"), "``<code>code</code>``");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            format_reply("Steps:\n1. First\n2. Second"),
            "Steps:<br><ol><li>First</li><br><li>Second</li></ol>"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            format_reply("- apples\n• pears"),
            "<ul><li>apples</li><br><li>pears</li></ul>"
        );
    }

    #[test]
    fn test_unordered_stage_leaves_ordered_wrapper_alone() {
        let ordered = format_ordered_lists("1. a\n2. b");
        assert_eq!(format_unordered_lists(&ordered), ordered);
    }

    #[test]
    fn test_bullets_before_ordered_list_are_not_wrapped_across_it() {
        assert_eq!(
            format_reply("- x\n- y\n1. a\n2. b"),
            "<li>x</li><br><li>y</li><br><ol><li>a</li><br><li>b</li></ol>"
        );
    }

    #[test]
    fn test_crlf_line_endings_stay_outside_captures() {
        assert_eq!(
            format_ordered_lists("1. a\r\n2. b"),
            "<ol><li>a</li>\r\n<li>b</li></ol>"
        );
        assert_eq!(
            format_unordered_lists("- a\r\n- b"),
            "<ul><li>a</li>\r\n<li>b</li></ul>"
        );
        assert_eq!(format_bold("**a\r\nb**"), "**a\r\nb**");
    }

    #[test]
    fn test_list_item_markers_need_space() {
        assert_eq!(format_reply("-5 degrees"), "-5 degrees");
        assert_eq!(format_reply("3.14 is pi"), "3.14 is pi");
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            format_reply("Hello\n\n\nWorld\nagain"),
            "<p>Hello</p><p>World<br>again</p>"
        );
    }

    #[test]
    fn test_single_block_is_not_wrapped() {
        assert_eq!(format_paragraphs("just one\nblock"), "just one\nblock");
    }

    #[test]
    fn test_paragraph_blocks_are_trimmed() {
        assert_eq!(format_paragraphs(" a \n\n b "), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(format_line_breaks("a\nb\n"), "a<br>b<br>");
    }

    #[test]
    fn test_idempotent_on_plain_text() {
        for text in [
            "Hello world, how are you today?",
            "The answer is 42.",
            "",
            "Ünïcödé text with émojis 🎉",
        ] {
            let once = format_reply(text);
            assert_eq!(format_reply(&once), once);
            assert_eq!(once, text);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_reply(""), "");
    }
}
