//! Character reference resolution.
//!
//! Only the five predefined entities and numeric references are known.
//! Anything else is an error, since DTD-declared entities are not expanded.

use quick_xml::escape::resolve_xml_entity;

/// Resolve the body of a reference (the text between `&` and `;`).
///
/// # Errors
///
/// Returns a message for unknown entities, malformed numbers, and code
/// points that are not allowed in XML documents.
pub fn resolve_reference(name: &str) -> Result<String, String> {
    if let Some(resolved) = resolve_xml_entity(name) {
        return Ok(resolved.to_string());
    }

    let Some(numeric) = name.strip_prefix('#') else {
        return Err(format!("unknown entity '&{name};'"));
    };
    let code_point = match numeric.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => numeric.parse::<u32>().ok(),
    };
    code_point
        .and_then(char::from_u32)
        .filter(|&c| is_xml_char(c))
        .map(String::from)
        .ok_or_else(|| format!("invalid character reference '&{name};'"))
}

/// Characters allowed anywhere in an XML 1.0 document.
#[must_use]
pub const fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Returns the first character of `text` that is not allowed in XML.
#[must_use]
pub fn find_illegal_char(text: &str) -> Option<char> {
    text.chars().find(|&c| !is_xml_char(c))
}
