//! 配線: 標準アダプタで ChatSession を組み立てる

use std::sync::Arc;

use common::adapter::{
    FanoutLog, FileJsonLog, NoopLog, StderrLog, StdClock, StdEnvResolver, StdIdGenerator,
};
use common::error::Error;
use common::llm::{GeminiProvider, LlmDriver};
use common::ports::outbound::{Clock, EnvResolver, IdGenerator, Log, LogLevel};

use crate::adapter::journal_tools;
use crate::domain::{ProcessorMode, SessionOptions};
use crate::ports::inbound::MessageProcessor;
use crate::ports::outbound::ModelClient;
use crate::usecase::{ChatSession, EntryFactory, RemoteModelProcessor, RuleBasedProcessor};

/// --log-file と --verbose から出力先を決める（どちらも無ければ NoopLog）
pub fn wire_logger(options: &SessionOptions) -> Arc<dyn Log> {
    let mut sinks: Vec<Arc<dyn Log>> = Vec::new();
    if let Some(path) = &options.log_file {
        sinks.push(Arc::new(FileJsonLog::new(path)));
    }
    if options.verbose {
        sinks.push(Arc::new(StderrLog::new(LogLevel::Debug)));
    }
    match sinks.len() {
        0 => Arc::new(NoopLog),
        1 => sinks.remove(0),
        _ => Arc::new(FanoutLog::new(sinks)),
    }
}

/// モードに応じたプロセッサを組み立てる
///
/// API キーが無くても組み立ては成功し、最初の呼び出しで Env エラーになる。
pub fn wire_processor(
    options: &SessionOptions,
    env_resolver: &dyn EnvResolver,
    factory: &EntryFactory,
    logger: Arc<dyn Log>,
) -> Result<Box<dyn MessageProcessor>, Error> {
    let processor: Box<dyn MessageProcessor> = match options.mode {
        ProcessorMode::Rules => Box::new(RuleBasedProcessor::new(factory.clone(), logger)),
        ProcessorMode::Gemini => {
            let provider = GeminiProvider::new(
                options.model.clone(),
                env_resolver.api_key(),
                options.timeout,
            )?;
            let model: Arc<dyn ModelClient> = Arc::new(LlmDriver::new(provider));
            Box::new(RemoteModelProcessor::new(
                model,
                journal_tools(),
                factory.clone(),
                logger,
            ))
        }
    };
    Ok(processor)
}

/// 配線: 標準アダプタで ChatSession を組み立てる
pub fn wire_session(options: &SessionOptions, logger: Arc<dyn Log>) -> Result<ChatSession, Error> {
    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let id_gen: Arc<dyn IdGenerator> = Arc::new(StdIdGenerator::new(Arc::clone(&clock)));
    let factory = EntryFactory::new(id_gen, clock);
    let processor = wire_processor(options, &StdEnvResolver, &factory, Arc::clone(&logger))?;
    Ok(ChatSession::new(processor, factory, logger))
}
