/// Hard cap on technology tokens kept from one submission.
pub const MAX_TECHNOLOGIES: usize = 50;

/// Longest user-agent string persisted to the audit log.
pub const MAX_USER_AGENT_LEN: usize = 255;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims a free-text field; empty strings become None so optional columns
/// stay NULL instead of storing "".
pub fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Splits a raw technologies string on comma/semicolon/pipe/newline,
/// trimming tokens, dropping empties, deduplicating by first occurrence
/// (case-insensitive) and keeping at most MAX_TECHNOLOGIES entries.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::new();

    for token in raw.split(|c| matches!(c, ',' | ';' | '|' | '\n')) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let key = token.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        result.push(token.to_string());
        if result.len() == MAX_TECHNOLOGIES {
            break;
        }
    }

    result
}

pub fn truncate_user_agent(ua: &str) -> String {
    if ua.len() <= MAX_USER_AGENT_LEN {
        return ua.to_string();
    }
    // Cut on a char boundary so multi-byte agents do not panic.
    let mut end = MAX_USER_AGENT_LEN;
    while !ua.is_char_boundary(end) {
        end -= 1;
    }
    ua[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_delimiters_in_order() {
        let parsed = parse_technologies("React, Node.js; Python|Go\nRust");
        assert_eq!(parsed, vec!["React", "Node.js", "Python", "Go", "Rust"]);
    }

    #[test]
    fn drops_empty_and_whitespace_tokens() {
        let parsed = parse_technologies(" ,React,, ;  |\n Rust ");
        assert_eq!(parsed, vec!["React", "Rust"]);
    }

    #[test]
    fn deduplicates_case_insensitively_keeping_first() {
        let parsed = parse_technologies("React, react, REACT, Vue");
        assert_eq!(parsed, vec!["React", "Vue"]);
    }

    #[test]
    fn caps_at_fifty_tokens() {
        let raw = (0..80).map(|i| format!("tech{}", i)).collect::<Vec<_>>().join(",");
        let parsed = parse_technologies(&raw);
        assert_eq!(parsed.len(), MAX_TECHNOLOGIES);
        assert_eq!(parsed[0], "tech0");
        assert_eq!(parsed[49], "tech49");
    }

    #[test]
    fn normalizes_email() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[test]
    fn empty_optional_becomes_none() {
        assert_eq!(clean_optional(Some("   ")), None);
        assert_eq!(clean_optional(Some(" Lisbon ")), Some("Lisbon".to_string()));
        assert_eq!(clean_optional(None), None);
    }

    #[test]
    fn truncates_long_user_agent_on_char_boundary() {
        let ua = "é".repeat(300);
        let truncated = truncate_user_agent(&ua);
        assert!(truncated.len() <= MAX_USER_AGENT_LEN);
        assert!(truncated.chars().all(|c| c == 'é'));

        let short = "Mozilla/5.0";
        assert_eq!(truncate_user_agent(short), short);
    }
}
