//! Directive masking
//!
//! Gecko's `.webidl` files are run through a C-style preprocessor, so they
//! contain `#ifdef`/`#endif` lines the grammar cannot parse. Masking turns each
//! such line into a `//` comment, which the tokeniser keeps as trivia; unmasking
//! strips the prefix again after writing.
//!
//! A source that already has a line starting with `//#` does not survive the
//! round trip: unmasking turns it into a directive.

/// Prefix every line starting with `#` with `//`
pub fn mask(text: &str) -> String {
    map_lines(text, |line| {
        if line.starts_with('#') {
            format!("//{line}")
        } else {
            line.to_string()
        }
    })
}

/// Remove the `//` in front of every line starting with `//#`
pub fn unmask(text: &str) -> String {
    map_lines(text, |line| match line.strip_prefix("//") {
        Some(rest) if rest.starts_with('#') => rest.to_string(),
        _ => line.to_string(),
    })
}

fn map_lines(text: &str, f: impl Fn(&str) -> String) -> String {
    text.split('\n').map(f).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_directives() {
        let source = "#if 0\ninterface A {};\n#endif\n";
        assert_eq!(mask(source), "//#if 0\ninterface A {};\n//#endif\n");
        assert_eq!(unmask(&mask(source)), source);
        assert_eq!(mask(&mask(source)), mask(source));
    }

    #[test]
    fn test_indented_hash_is_not_a_directive() {
        assert_eq!(mask("  #define X"), "  #define X");
    }

    #[test]
    fn test_carriage_returns_stay_on_their_line() {
        let source = "#ifdef X\r\ninterface A {};\r\n";
        assert_eq!(mask(source), "//#ifdef X\r\ninterface A {};\r\n");
        assert_eq!(unmask(&mask(source)), source);
    }

    #[test]
    fn test_existing_masked_directive_is_not_preserved() {
        assert_eq!(unmask(&mask("//#pragma")), "#pragma");
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let source = "interface A {};\n// comment\n";
        assert_eq!(mask(source), source);
        assert_eq!(unmask(source), source);
    }
}
