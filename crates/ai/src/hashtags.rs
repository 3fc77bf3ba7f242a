//! Parsing of hashtag completions.

/// Extracts hashtags from a completion: one per trimmed line, lines that do
/// not start with `#` are dropped, at most `count` are kept.
pub fn parse_hashtags(text: &str, count: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('#'))
        .take(count)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_hash_lines_in_order() {
        let text = "Here you go:\n#Bakery\n  #FreshBread  \n1. #Numbered\n\n#Local\n#Extra";
        assert_eq!(parse_hashtags(text, 3), vec!["#Bakery", "#FreshBread", "#Local"]);
        assert_eq!(parse_hashtags(text, 10).len(), 4);
        assert!(parse_hashtags("no tags here", 5).is_empty());
    }

    #[test]
    fn a_lone_hash_still_counts() {
        assert_eq!(parse_hashtags("#\n#Bakery", 5), vec!["#", "#Bakery"]);
    }

    #[test]
    fn zero_count_keeps_nothing() {
        assert!(parse_hashtags("#Bakery\n#Local", 0).is_empty());
    }
}
