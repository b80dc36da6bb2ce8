mod adapter;
mod cli;
mod domain;
mod ports;
mod repl;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io;
use std::process;
use std::sync::Arc;

use cli::{config_to_command, parse_args, write_completion};
use common::error::Error;
use common::ports::outbound::{Log, LogRecord};
use domain::{JournalCommand, SessionOptions};
use ports::inbound::UseCaseRunner;
use wiring::{wire_logger, wire_session};

/// JournalCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner;

impl Runner {
    fn chat(&self, options: &SessionOptions, logger: Arc<dyn Log>) -> Result<i32, Error> {
        let mut session = wire_session(options, logger)?;
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        repl::run_repl(&mut session, stdin.lock(), &mut stdout)?;
        Ok(0)
    }

    fn send(
        &self,
        options: &SessionOptions,
        message: &str,
        logger: Arc<dyn Log>,
    ) -> Result<i32, Error> {
        let mut session = wire_session(options, logger)?;
        repl::send_once(&mut session, message, &mut io::stdout())?;
        Ok(0)
    }

    /// セッションを伴うコマンドを lifecycle ログで挟んで実行する
    fn with_lifecycle(
        &self,
        command_name: &str,
        options: &SessionOptions,
        body: impl FnOnce(Arc<dyn Log>) -> Result<i32, Error>,
    ) -> Result<i32, Error> {
        let logger = wire_logger(options);
        let _ = logger.log(
            &LogRecord::info("command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("mode", options.mode.as_str()),
        );
        let result = body(Arc::clone(&logger));
        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = logger.log(
            &LogRecord::info("command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(e) = &result {
            let _ = logger.log(&LogRecord::error(e.to_string()).layer("cli").kind("error"));
        }
        result
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, command: JournalCommand) -> Result<i32, Error> {
        match command {
            JournalCommand::Help => {
                print_help();
                Ok(0)
            }
            JournalCommand::Completion(shell) => {
                write_completion(shell, &mut io::stdout());
                Ok(0)
            }
            JournalCommand::Chat(options) => {
                self.with_lifecycle("chat", &options, |logger| self.chat(&options, logger))
            }
            JournalCommand::Send { options, message } => {
                self.with_lifecycle("send", &options, |logger| {
                    self.send(&options, &message, logger)
                })
            }
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("journal: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let config = parse_args()?;
    Runner.run(config_to_command(config))
}

fn print_usage() {
    eprintln!("Usage: journal [options] [message...]");
}

fn print_help() {
    println!("Usage: journal [options] [message...]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  --mode <rules|gemini>      Message processor. Default: rules (offline regex rules)");
    println!("  -m, --model <model>        Gemini model name. Default: gemini-2.5-flash");
    println!("  --timeout <secs>           Timeout for each model request. Default: 60");
    println!("  --log-file <path>          Append structured JSONL logs to this file");
    println!("  -v, --verbose              Print logs to stderr");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY  API key for --mode gemini (falls back to API_KEY)");
    println!();
    println!("Description:");
    println!("  Without a message, start an interactive session (type /help for commands).");
    println!("  With a message, send it once and print the reply.");
    println!();
    println!("Examples:");
    println!("  journal");
    println!("  journal Add milk to my shopping list");
    println!("  journal --mode gemini what should I buy");
}
