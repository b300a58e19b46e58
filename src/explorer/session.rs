use simple_log::{error, info};
use std::fmt;
use tokio::sync::Mutex;

use super::command::{parse_command, Command, HELP};
use super::error::ExplorerError;
use super::render::*;
use super::words::{load_words, INITIAL_WORDS, SAMPLE_WORDS};
use crate::trie::PrefixTree;

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub limit: usize,
    pub tree_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            tree_depth: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Message { kind: MessageKind, text: String },
    Nothing,
    Quit,
}

impl Outcome {
    fn success(text: impl Into<String>) -> Self {
        Outcome::Message {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Outcome::Message {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Outcome::Message {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Message {
                kind: MessageKind::Success,
                text,
            } => write!(f, "ok: {}", text),
            Outcome::Message {
                kind: MessageKind::Error,
                text,
            } => write!(f, "error: {}", text),
            Outcome::Message {
                kind: MessageKind::Info,
                text,
            } => write!(f, "{}", text),
            Outcome::Nothing | Outcome::Quit => Ok(()),
        }
    }
}

fn is_letters(word: &str) -> bool {
    word.chars().all(|ch| ch.is_ascii_alphabetic())
}

#[derive(Debug)]
pub struct Session {
    trie: Mutex<PrefixTree>,
    pending_clear: Mutex<bool>,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            trie: Mutex::new(PrefixTree::new()),
            pending_clear: Mutex::new(false),
            config,
        }
    }

    pub async fn word_count(&self) -> usize {
        self.trie.lock().await.word_count()
    }

    pub async fn load_initial(&self) -> usize {
        let mut trie_lock = self.trie.lock().await;
        if trie_lock.word_count() > 0 {
            return 0;
        }
        for word in INITIAL_WORDS {
            trie_lock.insert(word);
        }
        info!("loaded {} initial words", trie_lock.word_count());
        trie_lock.word_count()
    }

    /// Returns how many new words were added.
    pub async fn load_pattern(&self, pattern: &str) -> Result<usize, ExplorerError> {
        let words = load_words(pattern)?;
        let mut trie_lock = self.trie.lock().await;
        let before = trie_lock.word_count();
        for word in words.iter() {
            trie_lock.insert(word);
        }
        let added = trie_lock.word_count() - before;
        info!("loaded {} new words from {}", added, pattern);
        Ok(added)
    }

    pub async fn execute(&self, line: &str) -> Outcome {
        {
            let mut pending = self.pending_clear.lock().await;
            if *pending {
                *pending = false;
                return self.confirm_clear(line).await;
            }
        }

        match parse_command(line) {
            Ok(Some(command)) => self.dispatch(command).await,
            Ok(None) => Outcome::Nothing,
            Err(e) => Outcome::error(e.to_string()),
        }
    }

    async fn dispatch(&self, command: Command) -> Outcome {
        match command {
            Command::Add(word) => self.add_word(&word).await,
            Command::Delete(word) => self.delete_word(&word).await,
            Command::Search(word) => self.search(&word).await,
            Command::Prefix(prefix) => self.prefix(&prefix).await,
            Command::Suggest { prefix, limit } => {
                self.suggest(&prefix, limit.unwrap_or(self.config.limit)).await
            }
            Command::Words { filter, order } => {
                let words = self.trie.lock().await.all_words();
                Outcome::info(render_word_list(
                    &words,
                    filter.as_deref().unwrap_or(""),
                    order,
                ))
            }
            Command::Count => {
                let count = self.word_count().await;
                Outcome::info(format!("{} words", count))
            }
            Command::Stats { json } => {
                let stats = self.trie.lock().await.statistics();
                if json {
                    match render_statistics_json(&stats) {
                        Ok(rendered) => Outcome::info(rendered),
                        Err(e) => {
                            error!("{}", e);
                            Outcome::error(e.to_string())
                        }
                    }
                } else {
                    Outcome::info(render_statistics(&stats))
                }
            }
            Command::Tree { depth } => {
                let trie_lock = self.trie.lock().await;
                if trie_lock.word_count() == 0 {
                    return Outcome::info("Add words to see the trie structure.");
                }
                Outcome::info(render_tree(
                    trie_lock.root(),
                    depth.unwrap_or(self.config.tree_depth),
                ))
            }
            Command::Sample => self.load_sample().await,
            Command::Load(pattern) => match self.load_pattern(&pattern).await {
                Ok(added) => {
                    let count = self.word_count().await;
                    Outcome::success(format!(
                        "Added {} words from {} ({} words total)",
                        added, pattern, count
                    ))
                }
                Err(e) => {
                    error!("failed to load {}: {}", pattern, e);
                    Outcome::error(e.to_string())
                }
            },
            Command::Clear => {
                *self.pending_clear.lock().await = true;
                Outcome::info(
                    "Are you sure you want to clear all words from the trie? \
                     This action cannot be undone. [y/N]",
                )
            }
            Command::Help => Outcome::info(HELP),
            Command::Quit => Outcome::Quit,
        }
    }

    async fn add_word(&self, word: &str) -> Outcome {
        let word = word.trim();
        if word.is_empty() {
            return Outcome::error("Please enter a word to add.");
        }
        if !is_letters(word) {
            return Outcome::error("Word can only contain letters.");
        }

        let mut trie_lock = self.trie.lock().await;
        if trie_lock.search(word) {
            return Outcome::error(format!("\"{}\" already exists in the trie.", word));
        }
        match trie_lock.try_insert(word) {
            Ok(()) => {
                info!("inserted {}", word);
                Outcome::success(format!(
                    "\"{}\" successfully added to the trie! ({} words)",
                    word,
                    trie_lock.word_count()
                ))
            }
            Err(e) => {
                error!("insert {} failed: {}", word, e);
                Outcome::error("Failed to add word. Please try again.")
            }
        }
    }

    async fn delete_word(&self, word: &str) -> Outcome {
        let word = word.trim();
        if word.is_empty() {
            return Outcome::error("Please enter a word to delete.");
        }

        let mut trie_lock = self.trie.lock().await;
        if !trie_lock.search(word) {
            return Outcome::error(format!("\"{}\" does not exist in the trie.", word));
        }
        match trie_lock.try_delete(word) {
            Ok(()) => {
                info!("deleted {}", word);
                Outcome::success(format!(
                    "\"{}\" successfully deleted from the trie! ({} words)",
                    word,
                    trie_lock.word_count()
                ))
            }
            Err(e) => {
                error!("delete {} failed: {}", word, e);
                Outcome::error("Failed to delete word. Please try again.")
            }
        }
    }

    async fn search(&self, word: &str) -> Outcome {
        let word = word.trim();
        let trie_lock = self.trie.lock().await;
        if trie_lock.search(word) {
            let times = trie_lock.insertions(word);
            return Outcome::success(format!(
                "\"{}\" found in the trie (inserted {} times)",
                word, times
            ));
        }

        let suggestions = trie_lock.words_with_prefix(word, self.config.limit);
        if suggestions.is_empty() {
            Outcome::error(format!("\"{}\" not found in the trie", word))
        } else {
            Outcome::error(format!(
                "\"{}\" not found in the trie, did you mean: {}",
                word,
                suggestions.join(", ")
            ))
        }
    }

    async fn prefix(&self, prefix: &str) -> Outcome {
        let prefix = prefix.trim();
        if self.trie.lock().await.starts_with(prefix) {
            Outcome::success(format!("some words start with \"{}\"", prefix))
        } else {
            Outcome::error(format!("no word starts with \"{}\"", prefix))
        }
    }

    async fn suggest(&self, prefix: &str, limit: usize) -> Outcome {
        let suggestions = self.trie.lock().await.words_with_prefix(prefix, limit);
        if suggestions.is_empty() {
            return Outcome::info(format!("No words start with \"{}\"", prefix.trim()));
        }
        match render_suggestions(&suggestions, prefix) {
            Ok(rendered) => Outcome::info(rendered),
            Err(e) => Outcome::error(e.to_string()),
        }
    }

    async fn load_sample(&self) -> Outcome {
        let mut trie_lock = self.trie.lock().await;
        let mut added = 0;
        for word in SAMPLE_WORDS {
            if !trie_lock.search(word) && trie_lock.insert(word) {
                added += 1;
            }
        }

        if added > 0 {
            info!("added {} sample words", added);
            Outcome::success(format!(
                "Added {} sample words to the trie! ({} words)",
                added,
                trie_lock.word_count()
            ))
        } else {
            Outcome::error("All sample words are already in the trie.")
        }
    }

    async fn confirm_clear(&self, answer: &str) -> Outcome {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => {
                let mut trie_lock = self.trie.lock().await;
                trie_lock.clear();
                info!("cleared trie");
                Outcome::success("All words have been cleared from the trie.")
            }
            _ => Outcome::info("Clear cancelled."),
        }
    }
}
