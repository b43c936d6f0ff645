//! Name tokenization shared by the index and the router

/// Split an identifier into lowercase word parts
///
/// Boundaries: any non-alphanumeric character (including `_` and `.`),
/// lower→upper (`addChild`), the end of an upper-case run followed by a
/// capitalized word (`HTTPRequest` → `http`, `request`) and letter→digit
/// (`Node2D` → `node`, `2d`). Duplicates are dropped, first occurrence kept.
pub fn word_parts(name: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for segment in name.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = segment.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || (prev.is_alphabetic() && cur.is_numeric())
                || (prev.is_uppercase() && cur.is_uppercase() && next_is_lower);
            if boundary {
                push_part(&mut parts, &chars[start..i]);
                start = i;
            }
        }
        push_part(&mut parts, &chars[start..]);
    }
    parts
}

fn push_part(parts: &mut Vec<String>, chars: &[char]) {
    if chars.is_empty() {
        return;
    }
    let part: String = chars.iter().collect::<String>().to_lowercase();
    if !parts.contains(&part) {
        parts.push(part);
    }
}

/// Case-folded form used by the case-insensitive name index
pub fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(word_parts("get_child_count"), vec!["get", "child", "count"]);
    }

    #[test]
    fn test_camel_and_upper_runs() {
        assert_eq!(word_parts("HTTPRequest"), vec!["http", "request"]);
        assert_eq!(word_parts("CharacterBody2D"), vec!["character", "body", "2d"]);
        assert_eq!(word_parts("Node2D"), vec!["node", "2d"]);
        assert_eq!(word_parts("addChild"), vec!["add", "child"]);
    }

    #[test]
    fn test_qualified_names_split_on_dot() {
        assert_eq!(word_parts("Node.ProcessMode"), vec!["node", "process", "mode"]);
    }

    #[test]
    fn test_duplicates_and_empties_dropped() {
        assert_eq!(word_parts("_get_get_"), vec!["get"]);
        assert!(word_parts("").is_empty());
    }
}
