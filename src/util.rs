//! Text decoding helpers shared by the parser.

use std::borrow::Cow;

/// Decode a CCXML document to text.
///
/// Valid UTF-8, with or without a BOM, is used as is. Anything else is read
/// with the encoding its XML declaration names, or Windows-1252 when the
/// declaration names none that `encoding_rs` knows.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return text;
    }

    let encoding = declared_encoding(bytes)
        .and_then(encoding_rs::Encoding::for_label)
        .unwrap_or(encoding_rs::WINDOWS_1252);
    encoding.decode(bytes).0
}

/// Value of the `encoding` pseudo-attribute in a leading `<?xml ...?>`.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let decl = bytes.strip_prefix(b"<?xml")?;
    let end = decl.windows(2).position(|w| w == b"?>")?;
    let decl = &decl[..end];

    let at = decl.windows(8).position(|w| w == b"encoding")?;
    let value = decl[at + 8..]
        .trim_ascii_start()
        .strip_prefix(b"=")?
        .trim_ascii_start();

    let (&quote, value) = value.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let len = value.iter().position(|&b| b == quote)?;
    Some(&value[..len])
}

/// Resolve an XML entity or character reference name (without `&` and `;`).
pub fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };

    char::from_u32(code).map(|c| c.to_string())
}

/// Replace entity and character references in an attribute value.
///
/// Unknown references are kept verbatim.
pub fn unescape_attribute(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';') {
            Some(semi) => match resolve_entity(&tail[1..semi]) {
                Some(resolved) => {
                    out.push_str(&resolved);
                    rest = &tail[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
