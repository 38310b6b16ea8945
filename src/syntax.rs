//! Identifier syntax checks

/// Whether `s` matches the SId production
///
/// `letter | '_'` followed by any number of `letter | digit | '_'`, ASCII only.
pub fn is_valid_sid(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_numeric() || matches!(c, '.' | '-' | '\u{B7}')
}

/// Whether `s` is a valid XML `ID` (an NCName)
pub fn is_valid_xml_id(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_name_start(c) => {}
        _ => return false,
    }
    chars.all(is_name_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sid_syntax() {
        assert!(is_valid_sid("m1"));
        assert!(is_valid_sid("_x"));
        assert!(is_valid_sid("Model_2"));
        assert!(!is_valid_sid(""));
        assert!(!is_valid_sid("1m"));
        assert!(!is_valid_sid("a-b"));
        assert!(!is_valid_sid("a b"));
        assert!(!is_valid_sid("é"));
    }

    #[test]
    fn test_xml_id_syntax() {
        assert!(is_valid_xml_id("meta-1.x"));
        assert!(is_valid_xml_id("_a"));
        assert!(!is_valid_xml_id("1a"));
        assert!(!is_valid_xml_id("a:b"));
        assert!(!is_valid_xml_id(""));
    }
}
