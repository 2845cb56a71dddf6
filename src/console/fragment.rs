//! Plain-text rendering of HTML fragments

use scraper::{ElementRef, Html};

const SKIPPED: [&str; 5] = ["script", "style", "noscript", "head", "template"];

/// Render an HTML fragment as terminal text.
///
/// Scripts and styles are dropped, block elements start on their own line
/// and form controls show their label or placeholder.
pub fn render_fragment(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = element_text(&fragment.root_element());
    normalize(&text)
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "section"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "br"
            | "li"
            | "tr"
            | "pre"
            | "label"
            | "button"
            | "select"
            | "textarea"
            | "nav"
    )
}

fn control_text(element: &ElementRef) -> Option<String> {
    let attrs = element.value();

    match attrs.name() {
        "input" => {
            let kind = attrs.attr("type").unwrap_or("text");
            if kind == "hidden" {
                return None;
            }
            let hint = attrs
                .attr("placeholder")
                .or_else(|| attrs.attr("name"))
                .or_else(|| attrs.attr("id"))?;
            Some(format!("[{}: {}]", kind, hint))
        }
        _ => None,
    }
}

fn element_text(element: &ElementRef) -> String {
    let mut text = String::new();

    for node in element.children() {
        if let Some(el) = ElementRef::wrap(node) {
            let tag_name = el.value().name();

            if SKIPPED.contains(&tag_name) {
                continue;
            }

            if is_block(tag_name) && !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }

            match control_text(&el) {
                Some(control) => text.push_str(&control),
                None => text.push_str(&element_text(&el)),
            }

            if is_block(tag_name) {
                text.push('\n');
            }
        } else if let Some(txt) = node.value().as_text() {
            text.push_str(&txt.replace(char::is_whitespace, " "));
        }
    }

    text
}

fn normalize(text: &str) -> String {
    text.lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
