use hashbrown::HashMap;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Default)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    is_terminal: bool,
    terminal_count: usize,
}

impl TrieNode {
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn terminal_count(&self) -> usize {
        self.terminal_count
    }

    pub fn children(&self) -> Vec<(char, &TrieNode)> {
        let mut children: Vec<(char, &TrieNode)> =
            self.children.iter().map(|(&ch, child)| (ch, child)).collect();
        children.sort_unstable_by_key(|&(ch, _)| ch);
        children
    }
}

// nested maps would otherwise drop one level per stack frame
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
    #[error("word is empty or contains characters other than letters")]
    InvalidInput,
    #[error("word is not stored")]
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub total_words: usize,
    pub total_nodes: usize,
    pub max_depth: usize,
    pub average_word_length: f64,
}

impl Statistics {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "totalWords": self.total_words,
            "totalNodes": self.total_nodes,
            "maxDepth": self.max_depth,
            "averageWordLength": self.average_word_length,
        })
    }
}

#[derive(Debug, Default)]
pub struct PrefixTree {
    root: TrieNode,
    total_words: usize,
}

fn normalize(word: &str) -> Option<String> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

fn is_valid_word(word: &str) -> bool {
    word.chars().all(|ch| ch.is_ascii_lowercase())
}

impl PrefixTree {
    pub fn new() -> Self {
        PrefixTree {
            root: TrieNode::default(),
            total_words: 0,
        }
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn insert(&mut self, word: &str) -> bool {
        let word = match normalize(word) {
            Some(word) => word,
            None => return false,
        };
        // nodes are created on the same walk, so reject before touching the tree
        if !is_valid_word(&word) {
            return false;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.is_terminal {
            node.is_terminal = true;
            self.total_words += 1;
        }
        node.terminal_count += 1;
        true
    }

    pub fn try_insert(&mut self, word: &str) -> Result<(), TrieError> {
        if self.insert(word) {
            Ok(())
        } else {
            Err(TrieError::InvalidInput)
        }
    }

    pub fn search(&self, word: &str) -> bool {
        normalize(word)
            .and_then(|word| self.find_node(&word))
            .map_or(false, |node| node.is_terminal)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        normalize(prefix)
            .and_then(|prefix| self.find_node(&prefix))
            .is_some()
    }

    pub fn insertions(&self, word: &str) -> usize {
        normalize(word)
            .and_then(|word| self.find_node(&word))
            .map_or(0, |node| node.terminal_count)
    }

    pub fn words_with_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut completions = Vec::new();
        let mut prefix = match normalize(prefix) {
            Some(prefix) => prefix,
            None => return completions,
        };

        if let Some(node) = self.find_node(&prefix) {
            Self::collect_words(node, &mut prefix, limit, &mut completions);
        }
        completions.sort();
        completions
    }

    pub fn delete_word(&mut self, word: &str) -> bool {
        let word: Vec<char> = match normalize(word) {
            Some(word) => word.chars().collect(),
            None => return false,
        };

        // deepest edge whose removal drops only nodes left without a word
        let mut cut = 0;
        let mut node = &self.root;
        for (depth, ch) in word.iter().enumerate() {
            if node.is_terminal || node.children.len() > 1 {
                cut = depth;
            }
            node = match node.children.get(ch) {
                Some(child) => child,
                None => return false,
            };
        }
        if !node.is_terminal {
            return false;
        }
        let prune = node.children.is_empty();

        let mut node = &mut self.root;
        for (depth, ch) in word.iter().enumerate() {
            if prune && depth == cut {
                node.children.remove(ch);
                self.total_words -= 1;
                return true;
            }
            node = match node.children.get_mut(ch) {
                Some(child) => child,
                None => return false,
            };
        }
        node.is_terminal = false;
        node.terminal_count = 0;
        self.total_words -= 1;
        true
    }

    pub fn try_delete(&mut self, word: &str) -> Result<(), TrieError> {
        if normalize(word).is_none() {
            return Err(TrieError::InvalidInput);
        }
        if self.delete_word(word) {
            Ok(())
        } else {
            Err(TrieError::NotFound)
        }
    }

    pub fn all_words(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut current = String::new();
        Self::collect_words(&self.root, &mut current, usize::MAX, &mut words);
        words.sort();
        words
    }

    pub fn word_count(&self) -> usize {
        self.total_words
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.total_words = 0;
    }

    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics {
            total_words: self.total_words,
            total_nodes: 0,
            max_depth: 0,
            average_word_length: 0.0,
        };
        let mut terminals = 0;
        let mut total_length = 0;
        Self::collect_stats(&self.root, &mut stats, &mut terminals, &mut total_length);

        if terminals > 0 {
            let average = total_length as f64 / terminals as f64;
            stats.average_word_length = (average * 100.0).round() / 100.0;
        }
        stats
    }

    fn find_node(&self, word: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in word.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn collect_words(
        node: &TrieNode,
        word: &mut String,
        limit: usize,
        completions: &mut Vec<String>,
    ) {
        let mut stack: Vec<(&TrieNode, usize, Option<char>)> = vec![(node, word.len(), None)];
        while let Some((node, len, ch)) = stack.pop() {
            if completions.len() >= limit {
                break;
            }
            word.truncate(len);
            if let Some(ch) = ch {
                word.push(ch);
            }
            if node.is_terminal {
                completions.push(word.clone());
            }
            // reversed so the smallest letter is popped first
            for (ch, child) in node.children().into_iter().rev() {
                stack.push((child, word.len(), Some(ch)));
            }
        }
    }

    fn collect_stats(
        root: &TrieNode,
        stats: &mut Statistics,
        terminals: &mut usize,
        total_length: &mut usize,
    ) {
        let mut stack = vec![(root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            stats.total_nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);
            if node.is_terminal {
                *terminals += 1;
                *total_length += depth;
            }
            stack.extend(node.children.values().map(|child| (child, depth + 1)));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tree_with(words: &[&str]) -> PrefixTree {
        let mut trie = PrefixTree::new();
        for word in words {
            assert!(trie.insert(word));
        }
        trie
    }

    fn count_terminals(node: &TrieNode) -> usize {
        let own = if node.is_terminal() { 1 } else { 0 };
        own + node
            .children()
            .into_iter()
            .map(|(_, child)| count_terminals(child))
            .sum::<usize>()
    }

    fn assert_no_dead_leaves(node: &TrieNode, is_root: bool) {
        if !is_root && node.children().is_empty() {
            assert!(node.is_terminal(), "leaf must end a stored word");
        }
        for (_, child) in node.children() {
            assert_no_dead_leaves(child, false);
        }
    }

    #[test]
    fn test_insert_then_search() {
        let trie = tree_with(&["hello", "help", "world"]);
        assert!(trie.search("hello"));
        assert!(trie.search("help"));
        assert!(trie.search("world"));
        assert!(!trie.search("hel"));
        assert!(!trie.search("helper"));
        assert!(!trie.search("xyz"));
        assert_eq!(3, trie.word_count());
    }

    #[test]
    fn test_normalization() {
        let mut trie = PrefixTree::new();
        assert!(trie.insert("  Apple "));
        assert!(trie.search("apple"));
        assert!(trie.search("APPLE"));
        assert!(trie.starts_with(" Ap"));
        assert_eq!(vec!["apple"], trie.words_with_prefix("AP", 10));
        assert!(trie.delete_word(" aPPle"));
        assert_eq!(0, trie.word_count());
    }

    #[test]
    fn test_reinsert_counts_once() {
        let mut trie = PrefixTree::new();
        assert!(trie.insert("cat"));
        assert!(trie.insert("cat"));
        assert!(trie.insert("Cat"));
        assert_eq!(1, trie.word_count());
        assert_eq!(3, trie.insertions("cat"));
        assert_eq!(0, trie.insertions("ca"));
        assert_eq!(0, trie.insertions("dog"));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut trie = tree_with(&["abc"]);
        assert!(!trie.insert(""));
        assert!(!trie.insert("   "));
        assert!(!trie.insert("abc123"));
        assert!(!trie.insert("ab cd"));
        assert!(!trie.insert("héllo"));
        assert_eq!(1, trie.word_count());
        // no partial path left behind by the rejected "abc123"/"ab cd"
        assert_eq!(4, trie.statistics().total_nodes);
        assert_eq!(Err(TrieError::InvalidInput), trie.try_insert("a1"));
        assert_eq!(Ok(()), trie.try_insert("abd"));
    }

    #[test]
    fn test_empty_queries() {
        let trie = tree_with(&["abc"]);
        assert!(!trie.search(""));
        assert!(!trie.starts_with(""));
        assert!(!trie.starts_with("  "));
        assert!(trie.words_with_prefix("", 10).is_empty());
        assert!(trie.words_with_prefix("abc", 0).is_empty());
    }

    #[test]
    fn test_starts_with() {
        let trie = tree_with(&["card"]);
        assert!(trie.starts_with("c"));
        assert!(trie.starts_with("car"));
        assert!(trie.starts_with("card"));
        assert!(!trie.starts_with("cards"));
        assert!(!trie.starts_with("d"));
    }

    #[test]
    fn test_words_with_prefix() {
        let trie = tree_with(&["apple", "app", "application", "apply", "banana"]);
        assert_eq!(
            vec!["app", "apple", "application", "apply"],
            trie.words_with_prefix("app", 10)
        );
        assert_eq!(vec!["app", "apple"], trie.words_with_prefix("app", 2));
        assert_eq!(vec!["application"], trie.words_with_prefix("appli", 10));
        assert!(trie.words_with_prefix("apx", 10).is_empty());
        assert!(trie.words_with_prefix("a1", 10).is_empty());
    }

    #[test]
    fn test_words_with_prefix_limit_across_subtrees() {
        let trie = tree_with(&["ba", "bb", "bc", "bca", "bd", "a", "c"]);
        assert_eq!(vec!["ba", "bb", "bc"], trie.words_with_prefix("b", 3));
        assert_eq!(
            vec!["ba", "bb", "bc", "bca", "bd"],
            trie.words_with_prefix("b", 100)
        );
    }

    #[test]
    fn test_delete_singleton() {
        let mut trie = tree_with(&["dog"]);
        assert!(trie.insert("zebra"));
        assert!(trie.delete_word("zebra"));
        assert!(!trie.search("zebra"));
        assert!(!trie.starts_with("z"));
        assert_eq!(1, trie.word_count());
        assert_eq!(4, trie.statistics().total_nodes);
    }

    #[test]
    fn test_delete_prefix_word_keeps_longer_word() {
        let mut trie = tree_with(&["car", "card"]);
        assert!(trie.delete_word("car"));
        assert!(trie.search("card"));
        assert!(!trie.search("car"));
        assert!(trie.starts_with("car"));
        assert_eq!(0, trie.insertions("car"));
        assert_eq!(1, trie.word_count());
    }

    #[test]
    fn test_delete_longer_word_keeps_prefix_word() {
        let mut trie = tree_with(&["car", "card", "care"]);
        assert!(trie.delete_word("card"));
        assert!(trie.search("car"));
        assert!(trie.search("care"));
        assert!(!trie.starts_with("card"));
        assert!(trie.delete_word("care"));
        assert_eq!(vec!["car"], trie.all_words());
        // root + c + a + r
        assert_eq!(4, trie.statistics().total_nodes);
        assert_no_dead_leaves(trie.root(), true);
    }

    #[test]
    fn test_delete_missing() {
        let mut trie = tree_with(&["card"]);
        assert!(!trie.delete_word("car"));
        assert!(!trie.delete_word("cards"));
        assert!(!trie.delete_word("dog"));
        assert!(!trie.delete_word(""));
        assert_eq!(1, trie.word_count());
        assert_eq!(Err(TrieError::NotFound), trie.try_delete("car"));
        assert_eq!(Err(TrieError::InvalidInput), trie.try_delete(" "));
        assert_eq!(Ok(()), trie.try_delete("card"));
        assert!(trie.root().children().is_empty());
    }

    #[test]
    fn test_all_words_sorted() {
        let trie = tree_with(&["zoo", "apple", "mango", "app", "banana"]);
        assert_eq!(
            vec!["app", "apple", "banana", "mango", "zoo"],
            trie.all_words()
        );
    }

    #[test]
    fn test_clear() {
        let mut trie = tree_with(&["one", "two", "three"]);
        trie.clear();
        assert_eq!(0, trie.word_count());
        assert!(trie.all_words().is_empty());
        assert!(!trie.search("one"));
        assert_eq!(1, trie.statistics().total_nodes);
    }

    #[test]
    fn test_statistics() {
        let trie = tree_with(&["a", "ab"]);
        let stats = trie.statistics();
        assert_eq!(2, stats.total_words);
        assert_eq!(3, stats.total_nodes);
        assert_eq!(2, stats.max_depth);
        assert_eq!(1.5, stats.average_word_length);

        let empty = PrefixTree::new().statistics();
        assert_eq!(0, empty.total_words);
        assert_eq!(1, empty.total_nodes);
        assert_eq!(0, empty.max_depth);
        assert_eq!(0.0, empty.average_word_length);
    }

    #[test]
    fn test_statistics_rounding_and_json() {
        let trie = tree_with(&["ab", "abc", "abcd"]);
        let stats = trie.statistics();
        assert_eq!(3.0, stats.average_word_length);

        let trie = tree_with(&["a", "a", "bb", "ccc", "cc"]);
        let stats = trie.statistics();
        // (1 + 2 + 3 + 2) / 4
        assert_eq!(2.0, stats.average_word_length);

        let trie = tree_with(&["a", "bb", "bc"]);
        let stats = trie.statistics();
        assert_eq!(1.67, stats.average_word_length);
        let value = stats.to_json();
        assert_eq!(3, value["totalWords"]);
        assert_eq!(5, value["totalNodes"]);
        assert_eq!(2, value["maxDepth"]);
        assert_eq!(1.67, value["averageWordLength"]);
    }

    #[test]
    fn test_children_sorted() {
        let trie = tree_with(&["c", "a", "b"]);
        let keys: Vec<char> = trie.root().children().iter().map(|&(ch, _)| ch).collect();
        assert_eq!(vec!['a', 'b', 'c'], keys);
    }

    #[test]
    fn test_very_long_word() {
        let long = "a".repeat(200_000);
        let mut trie = tree_with(&[&long, "ab"]);

        let stats = trie.statistics();
        assert_eq!(2, stats.total_words);
        assert_eq!(200_002, stats.total_nodes);
        assert_eq!(200_000, stats.max_depth);

        let words = trie.all_words();
        assert_eq!(2, words.len());
        assert_eq!(200_000, words[0].len());
        assert_eq!(vec!["ab"], trie.words_with_prefix("ab", 10));
        assert_eq!(1, trie.words_with_prefix("aa", 10).len());

        assert!(trie.delete_word(&long));
        assert!(!trie.search(&long));
        assert_eq!(vec!["ab"], trie.all_words());
        assert_eq!(3, trie.statistics().total_nodes);

        assert!(trie.insert(&long));
        trie.clear();
        assert_eq!(0, trie.word_count());
        assert!(trie.insert(&long));
    }

    #[test]
    fn test_terminal_count_matches_word_count() {
        let mut trie = tree_with(&["in", "inn", "inner", "tea", "ted", "ten", "to"]);
        assert_eq!(trie.word_count(), count_terminals(trie.root()));
        for word in ["inn", "tea", "missing", "to", "to"] {
            trie.delete_word(word);
            assert_eq!(trie.word_count(), count_terminals(trie.root()));
            assert_no_dead_leaves(trie.root(), true);
        }
        assert_eq!(vec!["in", "inner", "ted", "ten"], trie.all_words());
    }
}
