//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use crate::algorithm::Strategy;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "vertices", "edge", "color", "strategy", "show", "stats", "reset",
    "clear",
];

/// 子命令映射
fn get_sub_commands(command: &str) -> Option<Vec<&'static str>> {
    match command {
        "color" | "colour" | "c" => Some(vec!["vertex", "edge"]),
        "strategy" | "s" => Some(Strategy::ALL.iter().map(|s| s.as_str()).collect()),
        _ => None,
    }
}

fn pairs<'a>(candidates: impl Iterator<Item = &'a str>) -> Vec<Pair> {
    candidates
        .map(|c| Pair {
            display: c.to_string(),
            replacement: c.to_string(),
        })
        .collect()
}

/// ChromaGraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    /// 计算补全候选：(替换起点, 候选列表)
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();
        let at_word_end = !line_to_cursor.is_empty() && !line_to_cursor.ends_with(' ');

        match (words.as_slice(), at_word_end) {
            ([], _) => (pos, pairs(COMMANDS.iter().copied())),
            ([current], true) => {
                // 小写形式可能比原文更长，起点按原文计算
                let start = pos - current.len();
                let prefix = current.to_lowercase();
                (
                    start,
                    pairs(COMMANDS.iter().copied().filter(|c| c.starts_with(&prefix))),
                )
            }
            ([command], false) => match get_sub_commands(&command.to_lowercase()) {
                Some(subs) => (pos, pairs(subs.into_iter())),
                None => (pos, vec![]),
            },
            ([command, current], true) => {
                match get_sub_commands(&command.to_lowercase()) {
                    Some(subs) => {
                        let start = pos - current.len();
                        (
                            start,
                            pairs(subs.into_iter().filter(|s| s.starts_with(*current))),
                        )
                    }
                    None => (pos, vec![]),
                }
            }
            _ => (pos, vec![]),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
