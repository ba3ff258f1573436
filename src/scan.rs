/// Sensitive keyword scan run before a single-file wipe
use regex::{Regex, RegexBuilder};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Keywords found in a file, in the configured order.
pub fn scan_file(path: &Path, keywords: &[String], limit: u64) -> io::Result<Vec<String>> {
    let mut bytes = Vec::new();
    File::open(path)?.take(limit).read_to_end(&mut bytes)?;
    Ok(scan_text(&String::from_utf8_lossy(&bytes), keywords))
}

/// Case-insensitive whole-word matching.
pub fn scan_text(content: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| match keyword_pattern(keyword) {
            Some(re) => re.is_match(content),
            None => false,
        })
        .cloned()
        .collect()
}

fn keyword_pattern(keyword: &str) -> Option<Regex> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn keywords() -> Vec<String> {
        ["password", "credit card", "ssn", "secret"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_whole_word_case_insensitive() {
        let found = scan_text("My PASSWORD and Credit Card are here", &keywords());
        assert_eq!(found, vec!["password".to_string(), "credit card".to_string()]);
    }

    #[test]
    fn test_partial_words_do_not_match() {
        // "secretary" and "passwords" are not whole-word hits
        assert!(scan_text("the secretary kept passwords", &keywords()).is_empty());
    }

    #[test]
    fn test_scan_file_respects_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut content = "x ".repeat(100);
        content.push_str("ssn 123-45-6789");
        fs::write(&path, content).unwrap();

        assert_eq!(scan_file(&path, &keywords(), 1024).unwrap(), vec!["ssn".to_string()]);
        assert!(scan_file(&path, &keywords(), 100).unwrap().is_empty());
    }

    #[test]
    fn test_binary_content_is_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let mut bytes = vec![0xFFu8, 0xFE, 0x00];
        bytes.extend_from_slice(b" secret ");
        fs::write(&path, bytes).unwrap();

        assert_eq!(scan_file(&path, &keywords(), 1 << 20).unwrap(), vec!["secret".to_string()]);
    }
}
