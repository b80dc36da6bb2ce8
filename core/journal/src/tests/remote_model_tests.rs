//! RemoteModelProcessor のシナリオテスト（StubModel で 2 往復を再現）

use std::sync::Arc;

use common::error::Error;
use common::llm::{FunctionCall, ModelResponse};
use common::msg::Msg;
use serde_json::json;

use crate::adapter::journal_tools;
use crate::adapter::stub_model::StubModel;
use crate::domain::{Category, Journal};
use crate::ports::inbound::MessageProcessor;
use crate::usecase::remote_model::SYSTEM_INSTRUCTION;
use crate::usecase::RemoteModelProcessor;

use super::{fixed_factory, noop_log};

fn processor(model: Arc<StubModel>) -> RemoteModelProcessor {
    RemoteModelProcessor::new(model, journal_tools(), fixed_factory(), noop_log())
}

fn seeded_journal() -> Journal {
    let factory = fixed_factory();
    [(Category::Shopping, "Milk"), (Category::Reminder, "call mom")]
        .iter()
        .map(|(c, s)| factory.create(*c, s).unwrap())
        .collect()
}

#[test]
fn test_no_tool_call_returns_text_and_same_journal() {
    let model = Arc::new(StubModel::text_only("I can only help with your journal."));
    let p = processor(Arc::clone(&model));
    let journal = seeded_journal();

    let r = p.process("What's the capital of France?", &[], &journal).unwrap();
    assert_eq!(r.reply, "I can only help with your journal.");
    assert_eq!(r.new_journal, journal);
    assert_eq!(
        r.new_history,
        vec![
            Msg::user("What's the capital of France?"),
            Msg::assistant("I can only help with your journal.")
        ]
    );

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system_instruction, SYSTEM_INSTRUCTION);
    assert_eq!(
        requests[0].tool_names,
        Some(vec!["addJournalEntry".to_string(), "getJournalEntries".to_string()])
    );
}

#[test]
fn test_add_journal_entry_appends_exactly_one() {
    let model = Arc::new(StubModel::call_then_text(
        "addJournalEntry",
        json!({"category": "SHOPPING", "content": "eggs"}),
        "Added eggs to your shopping list.",
    ));
    let p = processor(Arc::clone(&model));
    let journal = seeded_journal();

    let r = p.process("I need eggs", &[], &journal).unwrap();
    assert_eq!(r.reply, "Added eggs to your shopping list.");
    assert_eq!(r.new_journal.len(), journal.len() + 1);
    let last = r.new_journal.iter().last().unwrap();
    assert_eq!(last.content(), "eggs");
    assert_eq!(last.category(), Category::Shopping);
    // 入力は変更しない
    assert_eq!(journal.len(), 2);

    assert_eq!(r.new_history.len(), 4);
    assert!(matches!(&r.new_history[1], Msg::ToolCall { name, .. } if name == "addJournalEntry"));
    assert_eq!(
        r.new_history[2],
        Msg::tool_result(
            "call_addJournalEntry",
            "addJournalEntry",
            json!({"success": true, "message": "Added 'eggs' to shopping."})
        )
    );
    assert_eq!(r.new_history[3], Msg::assistant("Added eggs to your shopping list."));

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].tool_names.is_none(), "second call disables tools");
    assert_eq!(requests[1].history.len(), 3);
}

#[test]
fn test_get_journal_entries_filters_and_does_not_mutate() {
    let model = Arc::new(StubModel::call_then_text(
        "getJournalEntries",
        json!({"category": "SHOPPING", "keywords": ["milk"]}),
        "You have Milk on your list.",
    ));
    let p = processor(Arc::clone(&model));
    let journal = seeded_journal();

    let r = p.process("do I have milk?", &[], &journal).unwrap();
    assert_eq!(r.new_journal, journal);
    assert_eq!(
        r.new_history[2],
        Msg::tool_result(
            "call_getJournalEntries",
            "getJournalEntries",
            json!({"entries": [{"content": "Milk", "category": "SHOPPING"}]})
        )
    );
}

#[test]
fn test_unknown_tool_reports_error_and_continues() {
    let model = Arc::new(StubModel::call_then_text(
        "deleteJournal",
        json!({}),
        "Sorry, I can't do that.",
    ));
    let p = processor(Arc::clone(&model));
    let journal = seeded_journal();

    let r = p.process("delete everything", &[], &journal).unwrap();
    assert_eq!(r.reply, "Sorry, I can't do that.");
    assert_eq!(r.new_journal, journal);
    assert!(matches!(&r.new_history[2], Msg::ToolResult { result, .. }
        if result == &json!({"error": "Unknown function call"})));
}

#[test]
fn test_invalid_args_report_error_and_keep_journal() {
    let model = Arc::new(StubModel::call_then_text(
        "addJournalEntry",
        json!({"category": "TODO", "content": "eggs"}),
        "Which category?",
    ));
    let p = processor(model);
    let journal = seeded_journal();

    let r = p.process("add eggs", &[], &journal).unwrap();
    assert_eq!(r.new_journal, journal);
    match &r.new_history[2] {
        Msg::ToolResult { result, .. } => {
            assert!(result["error"].as_str().unwrap().contains("Unknown category"))
        }
        other => panic!("expected ToolResult, got {:?}", other),
    }
}

#[test]
fn test_only_first_function_call_is_executed() {
    let model = Arc::new(StubModel::new(vec![
        Ok(ModelResponse {
            text: None,
            function_calls: vec![
                FunctionCall::new("addJournalEntry", json!({"category": "SHOPPING", "content": "eggs"})),
                FunctionCall::new("addJournalEntry", json!({"category": "SHOPPING", "content": "ham"})),
            ],
        }),
        Ok(ModelResponse::text("Added eggs.")),
    ]));
    let p = processor(model);
    let r = p.process("eggs and ham", &[], &Journal::new()).unwrap();
    let contents: Vec<&str> = r.new_journal.iter().map(|e| e.content()).collect();
    assert_eq!(contents, vec!["eggs"]);
}

#[test]
fn test_thought_signature_is_kept_in_history() {
    let mut call = FunctionCall::new("getJournalEntries", json!({}));
    call.thought_signature = Some("sig-1".to_string());
    let model = Arc::new(StubModel::new(vec![
        Ok(ModelResponse::call(call)),
        Ok(ModelResponse::text("Nothing yet.")),
    ]));
    let p = processor(Arc::clone(&model));
    p.process("what did I save?", &[], &Journal::new()).unwrap();
    let second = &model.requests()[1];
    assert!(matches!(&second.history[1], Msg::ToolCall { thought_signature, .. }
        if thought_signature.as_deref() == Some("sig-1")));
}

#[test]
fn test_model_failure_is_returned_as_error() {
    let model = Arc::new(StubModel::new(vec![Err(Error::http("Gemini API error: quota"))]));
    let p = processor(model);
    let r = p.process("hi", &[], &Journal::new());
    assert_eq!(r, Err(Error::http("Gemini API error: quota")));
}

#[test]
fn test_second_call_failure_commits_nothing() {
    let model = Arc::new(StubModel::new(vec![
        Ok(ModelResponse::call(FunctionCall::new(
            "addJournalEntry",
            json!({"category": "NOTE", "content": "film"}),
        ))),
        Err(Error::http("HTTP 503")),
    ]));
    let p = processor(model);
    assert!(p.process("note film", &[], &Journal::new()).is_err());
}

#[test]
fn test_empty_response_is_malformed() {
    let model = Arc::new(StubModel::new(vec![Ok(ModelResponse::default())]));
    let p = processor(model);
    let r = p.process("hi", &[], &Journal::new());
    assert!(matches!(r, Err(Error::MalformedResponse(_))));
}

#[test]
fn test_prior_history_is_sent() {
    let model = Arc::new(StubModel::text_only("Sure."));
    let p = processor(Arc::clone(&model));
    let history = vec![Msg::user("hello"), Msg::assistant("Hi!")];
    let r = p.process("thanks", &history, &Journal::new()).unwrap();
    assert_eq!(r.new_history.len(), 4);
    assert_eq!(model.requests()[0].history.len(), 3);
}
