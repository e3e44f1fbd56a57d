//! Free-text sanitization for the SEPA basic Latin character set.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Punctuation allowed besides ASCII letters, digits and space.
const ALLOWED_PUNCTUATION: &[char] = &['/', '-', '?', ':', '(', ')', '.', ',', '\'', '+'];

/// Returns `true` if the character may appear in a SEPA text field.
pub fn is_sepa_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || ALLOWED_PUNCTUATION.contains(&c)
}

/// Reduces a string to the SEPA basic Latin set.
///
/// Accented letters are decomposed (NFKD) and keep their base letter; any
/// other character outside the set is dropped.
///
/// ```
/// use sepa_transfer::sanitize::sanitize_text;
///
/// assert_eq!(sanitize_text("Müller & Söhne"), "Muller  Sohne");
/// ```
pub fn sanitize_text(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| is_sepa_char(*c))
        .collect()
}
