//! Markdown Rendering
//!
//! Converts the markdown subset that models actually emit (headings,
//! emphasis, bullet and numbered lists, pipe tables, rules) into HTML.
//! Blocks that already start with an HTML tag pass through untouched, and
//! newlines inside paragraphs become `<br />` so model line breaks survive
//! on the page.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static NUMBERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());

struct Rendered {
    html: String,
    raw: bool,
}

pub(crate) fn markdown_to_html(text: &str) -> String {
    let mut rendered: Vec<Rendered> = Vec::new();
    for block in split_blocks(text) {
        let item = render_block(&block);
        if item.html.is_empty() {
            continue;
        }
        push_block(&mut rendered, item);
    }

    rendered
        .into_iter()
        .map(|r| r.html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append a block, merging lists that a blank line split apart
///
/// A numbered list whose items are separated by blank lines would
/// otherwise render as several single-item lists, each restarting at 1.
fn push_block(rendered: &mut Vec<Rendered>, block: Rendered) {
    if let Some(prev) = rendered.last_mut() {
        if !prev.raw && !block.raw {
            for tag in ["ol", "ul"] {
                let close = format!("</{tag}>");
                let open = format!("<{tag}>\n");
                if prev.html.ends_with(&close) && block.html.starts_with(&open) {
                    prev.html.truncate(prev.html.len() - close.len());
                    prev.html.push_str(&block.html[open.len()..]);
                    return;
                }
            }
        }
    }
    rendered.push(block);
}

fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn render_block(lines: &[&str]) -> Rendered {
    let first = lines.first().map_or("", |l| l.trim_start());
    if first.starts_with('<') {
        return Rendered {
            html: lines.join("\n"),
            raw: true,
        };
    }

    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if let Some((level, text)) = heading(line) {
            parts.push(format!("<h{level}>{}</h{level}>", inline(text)));
            i += 1;
        } else if is_rule(line) {
            parts.push("<hr />".into());
            i += 1;
        } else if bullet_text(line).is_some() {
            let mut items = Vec::new();
            while i < lines.len() {
                match bullet_text(lines[i].trim()) {
                    Some(text) => {
                        items.push(format!("<li>{}</li>", inline(text)));
                        i += 1;
                    }
                    None => break,
                }
            }
            parts.push(format!("<ul>\n{}\n</ul>", items.join("\n")));
        } else if numbered_text(line).is_some() {
            let mut items = Vec::new();
            while i < lines.len() {
                match numbered_text(lines[i].trim()) {
                    Some(text) => {
                        items.push(format!("<li>{}</li>", inline(text)));
                        i += 1;
                    }
                    None => break,
                }
            }
            parts.push(format!("<ol>\n{}\n</ol>", items.join("\n")));
        } else if is_table_start(lines, i) {
            let (html, consumed) = render_table(&lines[i..]);
            parts.push(html);
            i += consumed;
        } else {
            let mut para = Vec::new();
            while i < lines.len() {
                let line = lines[i].trim();
                if heading(line).is_some()
                    || is_rule(line)
                    || bullet_text(line).is_some()
                    || numbered_text(line).is_some()
                    || is_table_start(lines, i)
                {
                    break;
                }
                para.push(inline(line));
                i += 1;
            }
            parts.push(format!("<p>{}</p>", para.join("<br />\n")));
        }
    }

    Rendered {
        html: parts.join("\n"),
        raw: false,
    }
}

/// Bold first so double asterisks never match as two italics
fn inline(text: &str) -> String {
    let bold = BOLD_RE.replace_all(text, "<strong>$1</strong>");
    ITALIC_RE.replace_all(&bold, "<em>$1</em>").into_owned()
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if (1..=4).contains(&hashes) {
        Some((hashes, line[hashes..].trim_start()))
    } else {
        None
    }
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

fn numbered_text(line: &str) -> Option<&str> {
    NUMBERED_ITEM_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

fn is_table_start(lines: &[&str], i: usize) -> bool {
    lines[i].contains('|') && i + 1 < lines.len() && is_table_separator(lines[i + 1].trim())
}

fn is_table_separator(line: &str) -> bool {
    line.contains('-')
        && line.contains('|')
        && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn render_table(lines: &[&str]) -> (String, usize) {
    let header = table_cells(lines[0]);
    let mut consumed = 2;
    let mut rows = Vec::new();
    while consumed < lines.len() && lines[consumed].contains('|') {
        rows.push(table_cells(lines[consumed]));
        consumed += 1;
    }

    let mut html = String::from("<table>\n<thead>\n<tr>\n");
    for cell in &header {
        html.push_str(&format!("<th>{}</th>\n", inline(cell)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &rows {
        html.push_str("<tr>\n");
        for cell in row {
            html.push_str(&format!("<td>{}</td>\n", inline(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");

    (html, consumed)
}

fn table_cells(line: &str) -> Vec<&str> {
    line.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(str::trim)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(markdown_to_html("# Title"), "<h1>Title</h1>");
        assert_eq!(markdown_to_html("#### Deep"), "<h4>Deep</h4>");
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            markdown_to_html("**bold** and *italic*"),
            "<p><strong>bold</strong> and <em>italic</em></p>"
        );
    }

    #[test]
    fn test_bullet_list() {
        let html = markdown_to_html("- first\n- second");
        assert_eq!(html, "<ul>\n<li>first</li>\n<li>second</li>\n</ul>");
    }

    #[test]
    fn test_numbered_list() {
        let html = markdown_to_html("1. open an account\n2. invest monthly");
        assert_eq!(
            html,
            "<ol>\n<li>open an account</li>\n<li>invest monthly</li>\n</ol>"
        );
    }

    #[test]
    fn test_blank_separated_numbered_items_merge_into_one_list() {
        let html = markdown_to_html("1. first step\n\n2. second step");
        assert_eq!(
            html,
            "<ol>\n<li>first step</li>\n<li>second step</li>\n</ol>"
        );
    }

    #[test]
    fn test_paragraph_newlines_become_breaks() {
        let html = markdown_to_html("line one\nline two");
        assert_eq!(html, "<p>line one<br />\nline two</p>");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(markdown_to_html("---"), "<hr />");
    }

    #[test]
    fn test_pipe_table() {
        let html = markdown_to_html("| Fund | Return |\n|------|--------|\n| Index | 12% |");
        assert!(html.starts_with("<table>\n<thead>"));
        assert!(html.contains("<th>Fund</th>"));
        assert!(html.contains("<td>Index</td>"));
        assert!(html.contains("<td>12%</td>"));
        assert!(html.ends_with("</tbody>\n</table>"));
    }

    #[test]
    fn test_html_block_passes_through() {
        let block = "<h3 class=\"advice-heading\">Kept</h3>\n<p>verbatim</p>";
        assert_eq!(markdown_to_html(block), block);
    }

    #[test]
    fn test_heading_followed_by_text_in_one_block() {
        let html = markdown_to_html("## Strategy\nInvest early.");
        assert_eq!(html, "<h2>Strategy</h2>\n<p>Invest early.</p>");
    }

    #[test]
    fn test_mixed_document() {
        let text = "# Plan\n\n**Overview:**\nStart small.\n\n1. Build an emergency fund\n2. Pay down debt";
        let html = markdown_to_html(text);
        assert!(html.contains("<h1>Plan</h1>"));
        assert!(html.contains("<p><strong>Overview:</strong><br />\nStart small.</p>"));
        assert!(html.contains("<ol>\n<li>Build an emergency fund</li>\n<li>Pay down debt</li>\n</ol>"));
    }
}
