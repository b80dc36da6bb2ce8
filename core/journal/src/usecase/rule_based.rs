//! ルールベースのメッセージプロセッサ
//!
//! 意図の判定は純粋関数 `fn(&str) -> Option<Intent>` の列を優先順に試し、最初の Some を採る。
//! どれにも当たらなければ発話全体を保存する（Fallback）。

use crate::domain::{Category, Intent, Journal};
use crate::ports::inbound::{MessageProcessor, ProcessedResponse};
use crate::ports::outbound::Log;
use crate::usecase::EntryFactory;
use common::error::Error;
use common::msg::Msg;
use common::ports::outbound::LogRecord;
use regex::Regex;
use std::sync::{Arc, OnceLock};

pub const OUT_OF_SCOPE_REPLY: &str =
    "I'm only a journaling app. I can't perform calculations or answer general knowledge questions.";
pub const EMPTY_SHOPPING_LIST_REPLY: &str = "Your shopping list is empty.";

macro_rules! static_regex {
    ($pattern:expr) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pattern).expect("static pattern must compile"))
    }};
}

fn arithmetic() -> &'static Regex {
    static_regex!(r"(?i)\d+\s*[+\-*/]\s*\d+|calculate|sum|what\s+is\s+\d+")
}

fn general_knowledge() -> &'static Regex {
    static_regex!(r"(?i)who|when|where|define|meaning\s+of")
}

fn shopping_question() -> &'static Regex {
    static_regex!(r"(?i)what\s+is\s+my\s+shopping\s+list|what\s+should\s+i\s+buy|what\s+to\s+buy")
}

fn shopping_phrase() -> &'static Regex {
    static_regex!(r"(?i)shopping\s+list|at\s+the\s+supermarket")
}

fn add_verb() -> &'static Regex {
    static_regex!(r"(?i)(please\s+add|add|put|remember|remind\s+me\s+to)\s+")
}

fn add_to_shopping() -> &'static Regex {
    static_regex!(r"(?i)add\s+(.*?)\s+to\s+(my\s+)?(shopping\s+list|shopping)")
}

fn remind_me_to() -> &'static Regex {
    static_regex!(r"(?i)remind\s+me\s+to\s+(.*)")
}

/// 計算・一般知識の質問
fn match_out_of_scope(text: &str) -> Option<Intent> {
    (arithmetic().is_match(text) || general_knowledge().is_match(text)).then_some(Intent::OutOfScope)
}

/// 買い物リストの問い合わせ
///
/// 明示的な質問は常に問い合わせ。"shopping list" だけの言及は追加動詞が無いときに限る
/// （"Add milk to my shopping list" は追加）。
fn match_shopping_query(text: &str) -> Option<Intent> {
    if shopping_question().is_match(text) {
        return Some(Intent::ShoppingQuery);
    }
    (shopping_phrase().is_match(text) && !add_verb().is_match(text)).then_some(Intent::ShoppingQuery)
}

/// 1 番目のキャプチャが空でなければ返す
fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// 明示的な追加
fn match_add(text: &str) -> Option<Intent> {
    if !add_verb().is_match(text) && !add_to_shopping().is_match(text) {
        return None;
    }
    let content = capture(add_to_shopping(), text)
        .or_else(|| capture(remind_me_to(), text))
        .unwrap_or(text)
        .trim()
        .to_string();
    Some(Intent::Add {
        content,
        category: Category::detect(text),
    })
}

fn fallback(text: &str) -> Intent {
    Intent::Fallback {
        content: text.trim().to_string(),
        category: Category::detect(text),
    }
}

type Matcher = fn(&str) -> Option<Intent>;

/// 優先順（先勝ち）
const MATCHERS: &[Matcher] = &[match_out_of_scope, match_shopping_query, match_add];

/// 発話の意図を判定する
pub fn classify(text: &str) -> Intent {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(text))
        .unwrap_or_else(|| fallback(text))
}

/// 買い物リストを箇条書きにする（挿入順）
pub fn render_shopping_list(journal: &Journal) -> String {
    let items = journal.by_category(Category::Shopping);
    if items.is_empty() {
        return EMPTY_SHOPPING_LIST_REPLY.to_string();
    }
    let lines: Vec<String> = items.iter().map(|e| format!("- {}", e.content())).collect();
    format!("Your shopping list:\n{}", lines.join("\n"))
}

/// 正規表現ルールで発話を処理するプロセッサ
pub struct RuleBasedProcessor {
    factory: EntryFactory,
    log: Arc<dyn Log>,
}

impl RuleBasedProcessor {
    pub fn new(factory: EntryFactory, log: Arc<dyn Log>) -> Self {
        Self { factory, log }
    }
}

impl MessageProcessor for RuleBasedProcessor {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn process(
        &self,
        text: &str,
        history: &[Msg],
        journal: &Journal,
    ) -> Result<ProcessedResponse, Error> {
        let intent = classify(text);
        let _ = self.log.log(
            &LogRecord::debug("intent classified")
                .layer("usecase")
                .kind("intent")
                .field("intent", intent.name()),
        );

        let mut new_journal = journal.clone();
        let reply = match intent {
            Intent::OutOfScope => OUT_OF_SCOPE_REPLY.to_string(),
            Intent::ShoppingQuery => render_shopping_list(journal),
            Intent::Add { content, category } => {
                let entry = self.factory.create(category, &content)?;
                let reply = format!("Added '{}' to {}.", entry.content(), category.label());
                new_journal.push(entry);
                reply
            }
            Intent::Fallback { content, category } => {
                let entry = self.factory.create(category, &content)?;
                new_journal.push(entry);
                format!("Saved a new {} entry.", category.label())
            }
        };

        let mut new_history = history.to_vec();
        new_history.push(Msg::user(text));
        new_history.push(Msg::assistant(reply.clone()));

        Ok(ProcessedResponse {
            new_history,
            new_journal,
            reply,
        })
    }
}
