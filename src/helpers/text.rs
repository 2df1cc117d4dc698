//! Text helpers shared by the feed and preview-card writers

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    strip_invalid_xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip characters XML 1.0 does not allow
/// (#x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF])
pub fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

/// Break text into lines of at most `width` characters
///
/// Words longer than `width` get a line of their own rather than being split.
pub fn wrap_lines(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in s.split_whitespace() {
        let word_len = word.chars().count();
        let line_len = line.chars().count();
        if !line.is_empty() && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"Tom & Jerry's <"show">"#),
            "Tom &amp; Jerry&apos;s &lt;&quot;show&quot;&gt;"
        );
    }

    #[test]
    fn test_escape_xml_drops_control_chars() {
        assert_eq!(escape_xml("a\u{0008}b\tc"), "ab\tc");
    }

    #[test]
    fn test_wrap_lines() {
        assert_eq!(
            wrap_lines("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap_lines("supercalifragilistic is long", 5), vec![
            "supercalifragilistic",
            "is",
            "long"
        ]);
        assert!(wrap_lines("   ", 10).is_empty());
    }
}
