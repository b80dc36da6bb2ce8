use crate::domain::{JournalCommand, ProcessorMode, SessionOptions};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::ModelName;
use common::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// --generate: 補完スクリプトを出力して終了
    pub generate: Option<Shell>,
    pub mode: ProcessorMode,
    pub model: Option<ModelName>,
    /// --timeout: モデル呼び出し 1 回あたりの上限（秒）
    pub timeout_secs: u64,
    /// --log-file: JSONL ログの追記先
    pub log_file: Option<PathBuf>,
    /// -v / --verbose: 人間向けログを stderr に出す
    pub verbose: bool,
    pub message_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            generate: None,
            mode: ProcessorMode::default(),
            model: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
            verbose: false,
            message_args: Vec::new(),
        }
    }
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("journal")
        .about("Chat with a personal journal assistant")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("mode")
                .long("mode")
                .value_name("mode")
                .help("Message processor: rules (offline) or gemini")
                .value_parser(["rules", "gemini"])
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name for gemini mode")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout")
                .long("timeout")
                .value_name("secs")
                .help("Timeout for each model request in seconds")
                .value_parser(value_parser!(u64).range(1..))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("Append structured JSONL logs to this file")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("message")
                .value_name("message")
                .help("Send one message and exit")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let mode = match matches.get_one::<String>("mode") {
        Some(s) => s.parse::<ProcessorMode>()?,
        None => ProcessorMode::default(),
    };
    Ok(Config {
        help: matches.get_flag("help"),
        generate: matches.get_one::<Shell>("generate").copied(),
        mode,
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        timeout_secs: matches
            .get_one::<u64>("timeout")
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        verbose: matches.get_flag("verbose"),
        message_args: matches
            .get_many::<String>("message")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    })
}

/// コマンドラインを解析する
pub fn parse_args() -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// 引数スライスから解析する（テスト用）
#[cfg(test)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// 補完スクリプトを書き出す
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "journal", out);
}

/// Config を JournalCommand に変換する
pub fn config_to_command(config: Config) -> JournalCommand {
    if config.help {
        return JournalCommand::Help;
    }

    if let Some(shell) = config.generate {
        return JournalCommand::Completion(shell);
    }

    let options = SessionOptions {
        mode: config.mode,
        model: config.model,
        timeout: Duration::from_secs(config.timeout_secs),
        log_file: config.log_file,
        verbose: config.verbose,
    };

    if config.message_args.is_empty() {
        return JournalCommand::Chat(options);
    }

    JournalCommand::Send {
        options,
        message: config.message_args.join(" "),
    }
}
