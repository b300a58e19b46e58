use regex::RegexBuilder;

use super::error::ExplorerError;
use crate::trie::{Statistics, TrieNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

pub const TERMINAL_MARKER: &str = "✓";

/// Nodes deeper than `max_depth` are replaced by `...`.
pub fn render_tree(root: &TrieNode, max_depth: usize) -> String {
    let mut lines = Vec::new();
    let mut prefix = String::new();
    let mut stack: Vec<(&TrieNode, usize, Option<char>)> = vec![(root, 0, None)];
    while let Some((node, depth, ch)) = stack.pop() {
        let indent = "  ".repeat(depth);
        if depth > max_depth {
            lines.push(format!("{}...", indent));
            continue;
        }
        prefix.truncate(depth.saturating_sub(1));
        if let Some(ch) = ch {
            prefix.push(ch);
        }

        let label = if prefix.is_empty() { "(root)" } else { prefix.as_str() };
        if node.terminal_count() > 1 {
            lines.push(format!(
                "{}{} {} ({})",
                indent,
                label,
                TERMINAL_MARKER,
                node.terminal_count()
            ));
        } else if node.is_terminal() {
            lines.push(format!("{}{} {}", indent, label, TERMINAL_MARKER));
        } else {
            lines.push(format!("{}{}", indent, label));
        }

        for (ch, child) in node.children().into_iter().rev() {
            stack.push((child, depth + 1, Some(ch)));
        }
    }
    lines.join("\n")
}

pub fn filter_words(words: &[String], filter: &str, order: SortOrder) -> Vec<String> {
    let filter = filter.to_lowercase();
    let mut filtered: Vec<String> = words
        .iter()
        .filter(|word| word.to_lowercase().contains(&filter))
        .cloned()
        .collect();
    match order {
        SortOrder::Ascending => filtered.sort(),
        SortOrder::Descending => filtered.sort_by(|a, b| b.cmp(a)),
    }
    filtered
}

pub fn render_word_list(words: &[String], filter: &str, order: SortOrder) -> String {
    if words.is_empty() {
        return "No words in the trie yet. Add some words to get started!".to_string();
    }
    let filtered = filter_words(words, filter, order);
    let mut lines = vec![format!("Showing {} of {} words", filtered.len(), words.len())];
    lines.extend(filtered.into_iter().map(|word| format!("  {}", word)));
    lines.join("\n")
}

pub fn highlight_match(word: &str, query: &str) -> Result<String, ExplorerError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(word.to_string());
    }
    let re = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()?;
    Ok(re.replace_all(word, "[$0]").into_owned())
}

pub fn render_suggestions(suggestions: &[String], query: &str) -> Result<String, ExplorerError> {
    let mut lines = vec![format!("Suggestions ({}):", suggestions.len())];
    for suggestion in suggestions {
        lines.push(format!("  {}", highlight_match(suggestion, query)?));
    }
    Ok(lines.join("\n"))
}

pub fn render_statistics(stats: &Statistics) -> String {
    format!(
        "Total words:         {}\n\
         Total nodes:         {}\n\
         Max depth:           {}\n\
         Average word length: {:.2}",
        stats.total_words, stats.total_nodes, stats.max_depth, stats.average_word_length
    )
}

pub fn render_statistics_json(stats: &Statistics) -> Result<String, ExplorerError> {
    Ok(serde_json::to_string_pretty(&stats.to_json())?)
}
