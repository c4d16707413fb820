//! Sanitizing formatter for transcript content.
//!
//! All text, regardless of author, is HTML-escaped over its entire length
//! before anything else happens; the markup pass below operates on already
//! escaped text and can never reintroduce an unescaped angle bracket.
//!
//! Assistant text additionally gets a restricted markup transform, written
//! as an explicit tokenizer rather than chained substitutions so that no
//! transform ever touches markup emitted by an earlier one:
//!
//! - ```` ```lang\nbody\n``` ```` fenced code blocks
//! - `` `inline code` ``
//! - `**bold**`
//! - literal newlines become `<br>`
//!
//! User text is escaped only; echoing a user's input back must not let them
//! inject formatting.

/// Who authored a piece of transcript text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// Text typed by the user.
    User,
    /// Text produced by the model.
    Assistant,
}

/// Render untrusted text as safe markup.
pub fn render(text: &str, author: Author) -> String {
    let escaped = escape(text);
    match author {
        Author::User => escaped,
        Author::Assistant => transform(&escaped),
    }
}

/// Escape the three HTML-significant characters.
///
/// `&` first, so that the entities emitted for `<` and `>` survive intact.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Apply the assistant markup transform to escaped text.
///
/// Splits the input into fenced code blocks and prose, then runs the inline
/// pass over the prose segments only.
fn transform(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;

    while let Some(open) = rest.find("```") {
        match parse_fence(&rest[open..]) {
            Some(fence) => {
                out.push_str(&inline(&rest[..open]));
                fence.emit(&mut out);
                rest = &rest[open + fence.consumed..];
            }
            None => {
                // Unterminated or malformed fence: the backticks are plain
                // text from here on.
                out.push_str(&inline(&rest[..open]));
                out.push_str("```");
                rest = &rest[open + 3..];
            }
        }
    }
    out.push_str(&inline(rest));
    out
}

/// A parsed fenced code block. `consumed` is the byte length of the whole
/// fence in the source, including both fences.
struct Fence<'a> {
    lang: &'a str,
    body: &'a str,
    consumed: usize,
}

impl Fence<'_> {
    fn emit(&self, out: &mut String) {
        if self.lang.is_empty() {
            out.push_str("<pre><code>");
        } else {
            out.push_str("<pre><code class=\"language-");
            out.push_str(self.lang);
            out.push_str("\">");
        }
        out.push_str(self.body);
        out.push_str("</code></pre>");
    }
}

/// Try to parse a fenced code block at the start of `input` (which begins
/// with three backticks). Returns `None` when the opening line is not a
/// valid fence or there is no closing fence.
fn parse_fence(input: &str) -> Option<Fence<'_>> {
    let after_ticks = &input[3..];

    // Optional language tag: a short run of word characters, then a newline.
    let lang_end = after_ticks
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '_'))?;
    let lang = &after_ticks[..lang_end];
    let mut body_start = 3 + lang_end;
    match input[body_start..].chars().next() {
        Some('\n') => body_start += 1,
        Some('\r') if input[body_start..].starts_with("\r\n") => body_start += 2,
        _ => return None,
    }

    let close = input[body_start..].find("```")?;
    let mut body = &input[body_start..body_start + close];
    // One trailing newline belongs to the fence, not the body.
    if let Some(stripped) = body.strip_suffix('\n') {
        body = stripped.strip_suffix('\r').unwrap_or(stripped);
    }

    Some(Fence {
        lang,
        body,
        consumed: body_start + close + 3,
    })
}

/// Inline pass: code spans, bold, and line breaks.
///
/// Emitted `<code>` span contents are taken verbatim (already escaped) and
/// never re-scanned.
fn inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        let next = rest
            .char_indices()
            .find(|&(i, c)| c == '`' || c == '\n' || (c == '*' && rest[i..].starts_with("**")));

        let Some((i, c)) = next else {
            out.push_str(rest);
            break;
        };

        out.push_str(&rest[..i]);
        rest = &rest[i..];

        match c {
            '`' => match rest[1..].find('`') {
                Some(end) if end > 0 => {
                    out.push_str("<code>");
                    out.push_str(&rest[1..1 + end]);
                    out.push_str("</code>");
                    rest = &rest[end + 2..];
                }
                _ => {
                    out.push('`');
                    rest = &rest[1..];
                }
            },
            '*' => match rest[2..].find("**") {
                Some(end) if end > 0 => {
                    out.push_str("<strong>");
                    out.push_str(&inline(&rest[2..2 + end]));
                    out.push_str("</strong>");
                    rest = &rest[end + 4..];
                }
                _ => {
                    out.push_str("**");
                    rest = &rest[2..];
                }
            },
            '\n' => {
                out.push_str("<br>");
                rest = &rest[1..];
            }
            _ => unreachable!("scanner only stops on markup characters"),
        }
    }
    out
}
