//! Pure LaTeX escaping utilities.
//!
//! Text from the puzzle is escaped so that it typesets as written. Straight
//! quotes can be converted to directional ones first; the directional quote
//! characters have no special meaning to LaTeX and pass through escaping
//! untouched.

/// Escape characters that have special meaning in LaTeX.
///
/// - `\` → `\textbackslash{}`
/// - `{`, `}`, `%`, `&`, `_`, `#`, `$` → backslash-prefixed
/// - `^` → `\textasciicircum{}`
/// - `~` → `\textasciitilde{}`
///
/// # Examples
///
/// ```
/// use crossprint::latex::escape_latex;
///
/// assert_eq!(escape_latex("50% off"), "50\\% off");
/// assert_eq!(escape_latex("a_b"), "a\\_b");
/// ```
pub fn escape_latex(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\textbackslash{}"),
            '^' => result.push_str("\\textasciicircum{}"),
            '~' => result.push_str("\\textasciitilde{}"),
            '{' | '}' | '%' | '&' | '_' | '#' | '$' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Replace straight quotes with directional ones.
///
/// A quote opens when it starts the text or follows whitespace or an opening
/// bracket, and closes otherwise. A single quote between two letters or
/// digits, or before a digit (`'90s`), is an apostrophe.
///
/// # Examples
///
/// ```
/// use crossprint::latex::smart_quotes;
///
/// assert_eq!(smart_quotes("\"Hi,\" she said"), "\u{201C}Hi,\u{201D} she said");
/// assert_eq!(smart_quotes("it's"), "it\u{2019}s");
/// ```
pub fn smart_quotes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        let opens = is_opening_context(prev) && next.is_some_and(|n| !n.is_whitespace());
        match c {
            '"' if opens => result.push('\u{201C}'),
            '"' => result.push('\u{201D}'),
            '\'' if is_word_char(prev) && is_word_char(next) => result.push('\u{2019}'),
            '\'' if next.is_some_and(|n| n.is_ascii_digit()) => result.push('\u{2019}'),
            '\'' if opens => result.push('\u{2018}'),
            '\'' => result.push('\u{2019}'),
            _ => result.push(c),
        }
        prev = Some(c);
    }

    result
}

/// Escape text for LaTeX, optionally normalizing quotes first.
pub fn escape(text: &str, smart: bool) -> String {
    if smart {
        escape_latex(&smart_quotes(text))
    } else {
        escape_latex(text)
    }
}

fn is_opening_context(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => {
            c.is_whitespace() || matches!(c, '(' | '[' | '{' | '-' | '\u{2013}' | '\u{2014}' | '/')
        }
    }
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(char::is_alphanumeric)
}
