//! 端末フロントエンド（1 行読む → 応答を出す → 次の行）
//!
//! 入出力は BufRead / Write で受け取り、テストではメモリ上のバッファを渡す。

use crate::domain::EntryId;
use crate::usecase::rule_based::EMPTY_SHOPPING_LIST_REPLY;
use crate::usecase::ChatSession;
use common::error::Error;
use std::io::{BufRead, Write};

const PROMPT: &str = "you> ";
const REPLY_PREFIX: &str = "assistant> ";

const HELP: &str = "Commands:
  /list           Show the shopping list with ids
  /add <item>     Add an item to the shopping list
  /delete <id>    Delete an entry by id
  /journal        Show every journal entry
  /help           Show this help
  /quit           Exit
Anything else is sent to the assistant.";

/// 1 行分の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Quit,
    Help,
    List,
    Journal,
    Add(String),
    Delete(String),
    Unknown(String),
    Message(String),
}

/// 空行は None
pub fn parse_line(line: &str) -> Option<ReplInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if !line.starts_with('/') {
        return Some(ReplInput::Message(line.to_string()));
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };
    let input = match command {
        "/quit" | "/exit" => ReplInput::Quit,
        "/help" => ReplInput::Help,
        "/list" => ReplInput::List,
        "/journal" => ReplInput::Journal,
        "/add" => ReplInput::Add(rest.to_string()),
        "/delete" => ReplInput::Delete(rest.to_string()),
        other => ReplInput::Unknown(other.to_string()),
    };
    Some(input)
}

fn render_shopping_list(session: &ChatSession) -> String {
    let items = session.shopping_list();
    if items.is_empty() {
        return EMPTY_SHOPPING_LIST_REPLY.to_string();
    }
    let lines: Vec<String> = items
        .iter()
        .map(|e| format!("- [{}] {}", e.id(), e.content()))
        .collect();
    format!("Your shopping list ({}):\n{}", session.shopping_count(), lines.join("\n"))
}

fn render_journal(session: &ChatSession) -> String {
    let journal = session.journal();
    if journal.is_empty() {
        return "Your journal is empty.".to_string();
    }
    let lines: Vec<String> = journal
        .iter()
        .map(|e| format!("- [{}] {}: {}", e.id(), e.category(), e.content()))
        .collect();
    format!("Your journal:\n{}", lines.join("\n"))
}

/// 入力 1 件を処理して表示する文字列を返す。None なら終了
fn dispatch(session: &mut ChatSession, input: ReplInput) -> Result<Option<String>, Error> {
    let reply = match input {
        ReplInput::Quit => return Ok(None),
        ReplInput::Help => HELP.to_string(),
        ReplInput::List => render_shopping_list(session),
        ReplInput::Journal => render_journal(session),
        ReplInput::Add(item) => match session.add_item(&item) {
            Ok(_) => format!("Added '{}' to shopping.", item.trim()),
            Err(Error::InvalidArgument(_)) => "Usage: /add <item>".to_string(),
            Err(e) => return Err(e),
        },
        ReplInput::Delete(id) if id.is_empty() => "Usage: /delete <id>".to_string(),
        ReplInput::Delete(id) => {
            if session.delete_item(&EntryId::new(id.as_str())) {
                format!("Deleted {}.", id)
            } else {
                format!("No entry with id {}.", id)
            }
        }
        ReplInput::Unknown(command) => format!("Unknown command: {} (try /help)", command),
        ReplInput::Message(text) => session.send_message(&text)?,
    };
    Ok(Some(reply))
}

/// 挨拶を表示してから、/quit か入力終端まで対話を続ける
pub fn run_repl<R: BufRead, W: Write>(
    session: &mut ChatSession,
    input: R,
    out: &mut W,
) -> Result<(), Error> {
    if let Some(greeting) = session.transcript().first() {
        writeln!(out, "{}{}", REPLY_PREFIX, greeting.content)?;
    }
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let Some(parsed) = parse_line(&line) else {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
            continue;
        };
        match dispatch(session, parsed)? {
            Some(reply) => writeln!(out, "{}{}", REPLY_PREFIX, reply)?,
            None => return Ok(()),
        }
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// 1 件送って応答を表示する
pub fn send_once<W: Write>(session: &mut ChatSession, message: &str, out: &mut W) -> Result<(), Error> {
    let reply = session.send_message(message)?;
    writeln!(out, "{}{}", REPLY_PREFIX, reply)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("/quit"), Some(ReplInput::Quit));
        assert_eq!(parse_line("/add  oat milk "), Some(ReplInput::Add("oat milk".to_string())));
        assert_eq!(parse_line("/delete abc"), Some(ReplInput::Delete("abc".to_string())));
        assert_eq!(parse_line("/add"), Some(ReplInput::Add(String::new())));
        assert_eq!(parse_line("/frobnicate x"), Some(ReplInput::Unknown("/frobnicate".to_string())));
        assert_eq!(
            parse_line(" remind me to call mom "),
            Some(ReplInput::Message("remind me to call mom".to_string()))
        );
    }
}
