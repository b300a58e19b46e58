use super::error::ExplorerError;
use super::render::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Delete(String),
    Search(String),
    Prefix(String),
    Suggest {
        prefix: String,
        limit: Option<usize>,
    },
    Words {
        filter: Option<String>,
        order: SortOrder,
    },
    Count,
    Stats {
        json: bool,
    },
    Tree {
        depth: Option<usize>,
    },
    Sample,
    Load(String),
    Clear,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add <word>                insert a word
  delete <word>             delete a word
  search <word>             check whether a word is stored
  prefix <prefix>           check whether any word starts with a prefix
  suggest <prefix> [limit]  autocomplete a prefix
  words [filter] [--desc]   list stored words
  count                     number of stored words
  stats [--json]            trie statistics
  tree [depth]              draw the trie structure
  sample                    load the sample word list
  load <glob>               load words from files
  clear                     remove every word
  help                      show this message
  quit                      leave the explorer";

fn parse_number(token: &str) -> Result<usize, ExplorerError> {
    token
        .parse::<usize>()
        .map_err(|_| ExplorerError::InvalidNumber(token.to_string()))
}

fn required(rest: &str, name: &'static str) -> Result<String, ExplorerError> {
    if rest.is_empty() {
        Err(ExplorerError::MissingArgument(name))
    } else {
        Ok(rest.to_string())
    }
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, ExplorerError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match name.to_lowercase().as_str() {
        "add" | "insert" => Command::Add(required(rest, "add")?),
        "delete" | "del" | "rm" => Command::Delete(required(rest, "delete")?),
        "search" | "find" => Command::Search(required(rest, "search")?),
        "prefix" | "startswith" => Command::Prefix(required(rest, "prefix")?),
        "suggest" | "complete" => {
            let prefix = args
                .first()
                .ok_or(ExplorerError::MissingArgument("suggest"))?
                .to_string();
            let limit = args.get(1).map(|token| parse_number(token)).transpose()?;
            Command::Suggest { prefix, limit }
        }
        "words" | "list" => {
            let mut filter = None;
            let mut order = SortOrder::Ascending;
            for arg in args {
                match arg {
                    "--desc" => order = SortOrder::Descending,
                    "--asc" => order = SortOrder::Ascending,
                    _ => filter = Some(arg.to_string()),
                }
            }
            Command::Words { filter, order }
        }
        "count" => Command::Count,
        "stats" => Command::Stats {
            json: args.contains(&"--json"),
        },
        "tree" => Command::Tree {
            depth: args.first().map(|token| parse_number(token)).transpose()?,
        },
        "sample" => Command::Sample,
        "load" => Command::Load(required(rest, "load")?),
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(ExplorerError::UnknownCommand(name.to_string())),
    };
    Ok(Some(command))
}
