//! シナリオテスト（固定時計・StubModel・NoopLog で組み立てる）

mod remote_model_tests;

use std::sync::Arc;

use common::adapter::{FixedClock, NoopLog, StdIdGenerator};
use common::ports::outbound::Log;

use crate::ports::inbound::MessageProcessor;
use crate::usecase::{ChatSession, EntryFactory, RuleBasedProcessor};

pub(crate) fn fixed_factory() -> EntryFactory {
    let clock = Arc::new(FixedClock::new(1_760_000_000_000));
    EntryFactory::new(Arc::new(StdIdGenerator::new(clock.clone())), clock)
}

pub(crate) fn noop_log() -> Arc<dyn Log> {
    Arc::new(NoopLog)
}

pub(crate) fn rules_processor() -> RuleBasedProcessor {
    RuleBasedProcessor::new(fixed_factory(), noop_log())
}

pub(crate) fn session_with(processor: Box<dyn MessageProcessor>) -> ChatSession {
    ChatSession::new(processor, fixed_factory(), noop_log())
}

pub(crate) fn rules_session() -> ChatSession {
    session_with(Box::new(rules_processor()))
}
