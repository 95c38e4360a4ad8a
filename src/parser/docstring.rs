//! Docstring decoding
//!
//! Turns the source text of a Python string literal into its value and
//! cleans the indentation the way `inspect.cleandoc` does.

const TAB_SIZE: usize = 8;

/// Decode the value of a single string literal, including its prefix and quotes.
///
/// Returns `None` for bytes and formatted literals, which are never docstrings.
pub fn literal_value(text: &str) -> Option<String> {
    let quote_at = text.find(['"', '\''])?;
    let prefix = text[..quote_at].to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return None;
    }
    let raw = prefix.contains('r');

    let body = &text[quote_at..];
    let quote_len = if body.starts_with("\"\"\"") || body.starts_with("'''") {
        3
    } else {
        1
    };
    if body.len() < quote_len * 2 {
        return None;
    }
    let inner = &body[quote_len..body.len() - quote_len];

    Some(if raw {
        inner.to_string()
    } else {
        unescape(inner)
    })
}

/// Process backslash escapes of a non-raw string literal.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                push_code_point(&mut out, u32::from_str_radix(&digits, 8).ok(), next, &digits);
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = take_hex(&mut chars, width);
                if digits.len() == width {
                    push_code_point(&mut out, u32::from_str_radix(&digits, 16).ok(), next, &digits);
                } else {
                    out.push('\\');
                    out.push(next);
                    out.push_str(&digits);
                }
            }
            other => {
                // Unknown escapes (including \N{...}) are kept verbatim
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn take_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, width: usize) -> String {
    let mut digits = String::new();
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }
    digits
}

fn push_code_point(out: &mut String, code: Option<u32>, marker: char, digits: &str) {
    match code.and_then(char::from_u32) {
        Some(ch) => out.push(ch),
        None => {
            out.push('\\');
            if !marker.is_ascii_digit() {
                out.push(marker);
            }
            out.push_str(digits);
        }
    }
}

/// Clean docstring indentation.
///
/// Tabs are expanded, the first line is stripped of leading whitespace, the
/// common indentation of the remaining lines is removed, and leading and
/// trailing empty lines are dropped.
pub fn clean(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let mut lines: Vec<String> = expanded.split('\n').map(str::to_string).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);

    lines.join("\n")
}

fn expand_tabs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut column = 0;
    for c in s.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - (column % TAB_SIZE);
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}
