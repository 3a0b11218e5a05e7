//! HTML Sanitizer
//!
//! Allow-list cleaner applied to every piece of advisory HTML before it is
//! stored or returned. Only presentation-safe tags survive, and the only
//! attributes that survive on them are `class` and `style`. Script and
//! style elements disappear with their contents; any other disallowed tag
//! loses its markup but keeps its inner text.

const ALLOWED_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "b", "i", "strong", "em", "ul", "ol", "li", "br", "table",
    "thead", "tbody", "tr", "th", "td", "hr", "div", "span",
];

const ALLOWED_ATTRS: &[&str] = &["class", "style"];

const VOID_TAGS: &[&str] = &["br", "hr"];

struct ParsedTag {
    name: String,
    closing: bool,
    attrs: Vec<(String, String)>,
    /// Byte index just past the closing `>`
    end: usize,
}

/// Reduce arbitrary HTML to the allow-listed subset
///
/// The output is stable: sanitizing already-sanitized content returns it
/// byte for byte, which the formatter relies on for idempotence.
pub(crate) fn sanitize(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut i = 0;

    while i < html.len() {
        let Some(offset) = html[i..].find('<') else {
            out.push_str(&html[i..]);
            break;
        };
        out.push_str(&html[i..i + offset]);
        let start = i + offset;

        if html[start..].starts_with("<!--") {
            i = match html[start + 4..].find("-->") {
                Some(end) => start + 4 + end + 3,
                None => html.len(),
            };
            continue;
        }

        match parse_tag(html, start) {
            Some(tag) => {
                let name = tag.name.as_str();
                if ALLOWED_TAGS.contains(&name) {
                    emit_tag(&mut out, &tag);
                    i = tag.end;
                } else if !tag.closing && (name == "script" || name == "style") {
                    i = skip_past_closing(html, tag.end, name);
                } else {
                    // Disallowed tag: drop the markup, keep surrounding text
                    i = tag.end;
                }
            }
            None => {
                // Not a parseable tag, neutralize the angle bracket
                out.push_str("&lt;");
                i = start + 1;
            }
        }
    }

    out
}

fn parse_tag(html: &str, start: usize) -> Option<ParsedTag> {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut pos = start + 1;

    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    while pos < len && bytes[pos].is_ascii_alphanumeric() {
        pos += 1;
    }
    if pos == name_start {
        return None;
    }
    let name = html[name_start..pos].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while pos < len && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= len {
            return None;
        }
        match bytes[pos] {
            b'>' => {
                return Some(ParsedTag {
                    name,
                    closing,
                    attrs,
                    end: pos + 1,
                });
            }
            b'/' => {
                pos += 1;
                while pos < len && bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                if pos < len && bytes[pos] == b'>' {
                    return Some(ParsedTag {
                        name,
                        closing,
                        attrs,
                        end: pos + 1,
                    });
                }
                return None;
            }
            b'<' => return None,
            _ => {
                let attr_start = pos;
                while pos < len
                    && !bytes[pos].is_ascii_whitespace()
                    && !matches!(bytes[pos], b'=' | b'>' | b'/' | b'<')
                {
                    pos += 1;
                }
                if pos == attr_start {
                    return None;
                }
                let attr_name = html[attr_start..pos].to_ascii_lowercase();

                while pos < len && bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                let mut value = String::new();
                if pos < len && bytes[pos] == b'=' {
                    pos += 1;
                    while pos < len && bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    if pos >= len {
                        return None;
                    }
                    match bytes[pos] {
                        quote @ (b'"' | b'\'') => {
                            pos += 1;
                            let value_start = pos;
                            while pos < len && bytes[pos] != quote {
                                pos += 1;
                            }
                            if pos >= len {
                                return None;
                            }
                            value = html[value_start..pos].to_string();
                            pos += 1;
                        }
                        _ => {
                            let value_start = pos;
                            while pos < len
                                && !bytes[pos].is_ascii_whitespace()
                                && bytes[pos] != b'>'
                            {
                                pos += 1;
                            }
                            value = html[value_start..pos].to_string();
                        }
                    }
                }
                attrs.push((attr_name, value));
            }
        }
    }
}

/// Skip everything up to and including the matching close tag
fn skip_past_closing(html: &str, from: usize, name: &str) -> usize {
    let lower = html[from..].to_ascii_lowercase();
    let marker = format!("</{name}");
    let mut search = 0;

    while let Some(rel) = lower[search..].find(&marker) {
        let mut pos = search + rel + marker.len();
        while pos < lower.len() && lower.as_bytes()[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < lower.len() && lower.as_bytes()[pos] == b'>' {
            return from + pos + 1;
        }
        search = search + rel + 1;
    }

    html.len()
}

fn emit_tag(out: &mut String, tag: &ParsedTag) {
    let name = tag.name.as_str();
    if tag.closing {
        if !VOID_TAGS.contains(&name) {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        return;
    }

    out.push('<');
    out.push_str(name);
    for (attr, value) in &tag.attrs {
        if ALLOWED_ATTRS.contains(&attr.as_str()) {
            out.push(' ');
            out.push_str(attr);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }
    if VOID_TAGS.contains(&name) {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('<', "&lt;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_removed_with_contents() {
        let html = "<p>safe</p><script>alert('xss')</script><p>after</p>";
        assert_eq!(sanitize(html), "<p>safe</p><p>after</p>");
    }

    #[test]
    fn test_style_element_removed_with_contents() {
        let html = "<style>body { display: none; }</style><p>text</p>";
        assert_eq!(sanitize(html), "<p>text</p>");
    }

    #[test]
    fn test_uppercase_script_removed() {
        let html = "<SCRIPT>alert(1)</SCRIPT><p>ok</p>";
        assert_eq!(sanitize(html), "<p>ok</p>");
    }

    #[test]
    fn test_event_handlers_stripped() {
        let html = r#"<p onclick="steal()" class="advice-paragraph">hello</p>"#;
        assert_eq!(sanitize(html), r#"<p class="advice-paragraph">hello</p>"#);
    }

    #[test]
    fn test_disallowed_tag_keeps_inner_text() {
        let html = r#"<a href="https://example.com">a link</a> and <iframe>framed</iframe>"#;
        assert_eq!(sanitize(html), "a link and framed");
    }

    #[test]
    fn test_comments_removed() {
        let html = "<p>keep</p><!-- secret note -->";
        assert_eq!(sanitize(html), "<p>keep</p>");
    }

    #[test]
    fn test_class_and_style_survive() {
        let html = r#"<ul class="advice-list" style="margin-bottom: 16px;"><li>x</li></ul>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_void_tags_normalized() {
        assert_eq!(sanitize("line<br>break"), "line<br />break");
        assert_eq!(sanitize("<hr/>"), "<hr />");
    }

    #[test]
    fn test_stray_angle_bracket_escaped() {
        assert_eq!(sanitize("profit < loss"), "profit &lt; loss");
        assert_eq!(sanitize("a < b < c"), "a &lt; b &lt; c");
    }

    #[test]
    fn test_single_quoted_attrs_normalized() {
        let html = "<p class='advice-paragraph'>x</p>";
        assert_eq!(sanitize(html), r#"<p class="advice-paragraph">x</p>"#);
    }

    #[test]
    fn test_sanitize_is_stable() {
        let html = r#"<div class="advice-content"><h2 class="advice-heading">T</h2>
<p onclick="x" class="advice-paragraph">body &lt; text</p><script>bad()</script></div>"#;
        let once = sanitize(html);
        let twice = sanitize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unterminated_tag_is_neutralized() {
        assert_eq!(sanitize("text <p class=\"x"), "text &lt;p class=\"x");
    }
}
