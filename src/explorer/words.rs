use glob::glob;
use regex::Regex;
use simple_log::{debug, error, warn};
use std::fs;

use super::error::ExplorerError;

pub const SAMPLE_WORDS: [&str; 50] = [
    "apple", "application", "apply", "approach", "appropriate",
    "banana", "band", "bank", "bar", "base",
    "cat", "car", "card", "care", "careful",
    "dog", "door", "down", "drive", "drop",
    "elephant", "email", "end", "energy", "engine",
    "friend", "from", "front", "full", "function",
    "great", "green", "group", "grow", "guess",
    "house", "how", "however", "human", "hundred",
    "information", "into", "issue", "item", "important",
    "just", "job", "join", "jump", "june",
];

pub const INITIAL_WORDS: [&str; 15] = [
    "react", "javascript", "programming", "computer", "science",
    "algorithm", "data", "structure", "trie", "search",
    "autocomplete", "prefix", "tree", "node", "graph",
];

const WORD_PATTERN: &str = r"[A-Za-z]+";

pub fn expand_home(pattern: &str) -> String {
    if let Some(rest) = pattern.strip_prefix("~/") {
        if let Some(home) = home::home_dir() {
            return home.join(rest).display().to_string();
        }
    }
    pattern.to_string()
}

pub fn capture_words(content: &str) -> Result<Vec<String>, ExplorerError> {
    let re = Regex::new(WORD_PATTERN)?;
    Ok(re
        .find_iter(content)
        .map(|mat| mat.as_str().to_string())
        .collect())
}

// unreadable entries are logged and skipped
pub fn load_words(pattern: &str) -> Result<Vec<String>, ExplorerError> {
    let target = expand_home(pattern);
    let mut words = Vec::new();
    for entry in glob(&target)? {
        match entry {
            Ok(path) => {
                if path.is_dir() {
                    continue;
                }
                match fs::read_to_string(&path) {
                    Ok(content) => {
                        let found = capture_words(&content)?;
                        debug!("read {} words from {}", found.len(), path.display());
                        words.extend(found);
                    }
                    Err(e) => {
                        warn!("skipping {}: {}", path.display(), e);
                    }
                }
            }
            Err(e) => {
                error!("{:?}", e);
            }
        }
    }
    Ok(words)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let mut dir = env::temp_dir();
        dir.push(format!("trie-explorer-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_capture_words() {
        let words = capture_words("Hello, world! 123 abc_def x9y").unwrap();
        assert_eq!(vec!["Hello", "world", "abc", "def", "x", "y"], words);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!("/tmp/words.txt", expand_home("/tmp/words.txt"));
        assert_eq!("words/*.txt", expand_home("words/*.txt"));
        if let Some(home) = home::home_dir() {
            assert_eq!(
                home.join("words.txt").display().to_string(),
                expand_home("~/words.txt")
            );
        }
    }

    #[test]
    fn test_load_words() {
        let dir = scratch_dir("load");
        fs::write(dir.join("a.txt"), "apple banana\ncherry").unwrap();
        fs::write(dir.join("b.txt"), "date, elder-berry").unwrap();
        fs::write(dir.join("c.md"), "ignored").unwrap();
        fs::create_dir_all(dir.join("sub.txt")).unwrap();

        let pattern = format!("{}/*.txt", dir.display());
        let mut words = load_words(&pattern).unwrap();
        words.sort();
        assert_eq!(
            vec!["apple", "banana", "berry", "cherry", "date", "elder"],
            words
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_words_no_match() {
        let dir = scratch_dir("empty");
        let pattern = format!("{}/*.none", dir.display());
        assert!(load_words(&pattern).unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_words_bad_pattern() {
        assert!(matches!(
            load_words("[unclosed"),
            Err(ExplorerError::Pattern(_))
        ));
    }

    #[test]
    fn test_word_lists_are_valid() {
        assert!(SAMPLE_WORDS
            .iter()
            .chain(INITIAL_WORDS.iter())
            .all(|word| word.chars().all(|ch| ch.is_ascii_lowercase())));
    }
}
