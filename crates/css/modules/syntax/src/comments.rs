//! Comment stripping.

use log::warn;

/// Remove `//` line comments and `/* */` block comments.
///
/// Quoted strings and `url(...)` arguments are copied verbatim, so
/// `url(https://example.com/a.png)` and `content: "/* not a comment */"`
/// survive. Newlines inside block comments are kept so line numbers in later
/// diagnostics still match the original text. An unterminated `/*` runs to
/// the end of the text and is logged.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut url_depth = 0usize;

    while let Some((offset, character)) = chars.next() {
        if let Some(open) = quote {
            out.push(character);
            if escaped {
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else if character == open {
                quote = None;
            }
            continue;
        }

        if url_depth > 0 {
            out.push(character);
            match character {
                '"' | '\'' => quote = Some(character),
                '(' => url_depth = url_depth.saturating_add(1),
                ')' => url_depth = url_depth.saturating_sub(1),
                _ => {}
            }
            continue;
        }

        match character {
            '"' | '\'' => {
                quote = Some(character);
                out.push(character);
            }
            '(' if opens_url(text, offset) => {
                url_depth = 1;
                out.push(character);
            }
            '/' if chars.peek().is_some_and(|&(_, next)| next == '/') => {
                // Line comment: drop everything up to, not including, the newline.
                while chars.peek().is_some_and(|&(_, next)| next != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek().is_some_and(|&(_, next)| next == '*') => {
                chars.next();
                let mut closed = false;
                while let Some((_, inner)) = chars.next() {
                    if inner == '*' && chars.peek().is_some_and(|&(_, next)| next == '/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                    if inner == '\n' {
                        out.push('\n');
                    }
                }
                if !closed {
                    let line = text.get(..offset).map_or(0, |head| head.matches('\n').count());
                    warn!(
                        target: "css_stylesheet",
                        "unterminated block comment at line {}; the rest of the sheet is ignored",
                        line.saturating_add(1)
                    );
                }
            }
            _ => out.push(character),
        }
    }
    out
}

/// Whether the `(` at `offset` is the opening paren of a `url(` token.
fn opens_url(text: &str, offset: usize) -> bool {
    let Some(head) = text.get(..offset) else {
        return false;
    };
    let Some(start) = offset.checked_sub(3) else {
        return false;
    };
    let Some(name) = head.get(start..) else {
        return false;
    };
    if !name.eq_ignore_ascii_case("url") {
        return false;
    }
    // `myurl(` is not a url token.
    head.get(..start)
        .and_then(|before| before.chars().next_back())
        .is_none_or(|previous| !(previous.is_alphanumeric() || previous == '-' || previous == '_'))
}
