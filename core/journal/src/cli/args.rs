use crate::domain::JournalCommand;
use clap::builder::ArgAction;
use clap::error::ErrorKind;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::path::PathBuf;

pub const BIN_NAME: &str = "journal";

/// 解析済みの CLI 入力
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --server: サーバー URL の上書き（JOURNAL_SERVER より優先）
    pub server: Option<String>,
    pub command: JournalCommand,
}

impl Cli {
    #[cfg(test)]
    pub fn new(command: JournalCommand) -> Self {
        Self {
            verbose: false,
            server: None,
            command,
        }
    }
}

/// 解析結果: 通常のコマンド / 補完スクリプト生成 / ヘルプ表示
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Command(Cli),
    GenerateCompletion(Shell),
    /// --help / --version（clap が整形した文字列をそのまま出す）
    Help(String),
}

fn id_arg(name: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(name)
        .required(true)
        .help(help)
        .value_parser(value_parser!(u64))
}

fn build_clap_command() -> clap::Command {
    clap::Command::new(BIN_NAME)
        .about("Offline-aware learning journal client")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Echo structured logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            clap::Arg::new("server")
                .long("server")
                .value_name("url")
                .help("Server base URL (overrides JOURNAL_SERVER and config.json)")
                .num_args(1)
                .global(true),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(
            clap::Command::new("add")
                .about("Save an entry to the server and always to the local store")
                .arg(
                    clap::Arg::new("title")
                        .short('t')
                        .long("title")
                        .value_name("title")
                        .required(true)
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("content")
                        .short('c')
                        .long("content")
                        .value_name("text")
                        .required(true)
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("tags")
                        .long("tags")
                        .value_name("a,b,c")
                        .help("Comma-separated tags")
                        .default_value("")
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("list")
                .about("List local and server entries, newest first (default)")
                .arg(
                    clap::Arg::new("json")
                        .long("json")
                        .help("Print the merged list as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("show")
                .about("Print a local entry in copy format")
                .arg(id_arg("id", "Local entry id")),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a local entry (no-op if absent)")
                .arg(id_arg("id", "Local entry id")),
        )
        .subcommand(
            clap::Command::new("delete-remote")
                .about("Delete a server entry by its position in the server list")
                .arg(
                    clap::Arg::new("index")
                        .required(true)
                        .help("Position in the last fetched server list")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    clap::Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Do not ask for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("export")
                .about("Write both stores to journal-export-<date>.json")
                .arg(
                    clap::Arg::new("out")
                        .long("out")
                        .value_name("dir")
                        .help("Output directory (default: current directory)")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1),
                ),
        )
        .subcommand(clap::Command::new("status").about("Probe the server once and print the state"))
        .subcommand(clap::Command::new("watch").about("Run the connectivity heartbeat until Ctrl+C"))
        .subcommand(
            clap::Command::new("cache")
                .about("Manage the offline cache")
                .subcommand_required(true)
                .subcommand(clap::Command::new("install").about("Fetch all static assets into the current generation"))
                .subcommand(clap::Command::new("activate").about("Delete every generation except the current one"))
                .subcommand(clap::Command::new("list").about("List cache generations")),
        )
}

/// グローバル引数はサブコマンドの後ろにも書けるので、最も深い指定を探す
fn global_flag(matches: &clap::ArgMatches, id: &str) -> bool {
    matches.get_flag(id)
        || matches
            .subcommand()
            .map(|(_, sub)| global_flag(sub, id))
            .unwrap_or(false)
}

fn global_value(matches: &clap::ArgMatches, id: &str) -> Option<String> {
    matches
        .subcommand()
        .and_then(|(_, sub)| global_value(sub, id))
        .or_else(|| matches.get_one::<String>(id).cloned())
}

fn matches_to_cli(matches: &clap::ArgMatches) -> Result<Cli, Error> {
    let verbose = global_flag(matches, "verbose");
    let server = global_value(matches, "server");
    let command = match matches.subcommand() {
        None => JournalCommand::List { json: false },
        Some(("add", m)) => JournalCommand::Add {
            title: m.get_one::<String>("title").cloned().unwrap_or_default(),
            content: m.get_one::<String>("content").cloned().unwrap_or_default(),
            tags: m.get_one::<String>("tags").cloned().unwrap_or_default(),
        },
        Some(("list", m)) => JournalCommand::List {
            json: m.get_flag("json"),
        },
        Some(("show", m)) => JournalCommand::Show {
            id: required_id(m, "id")?,
        },
        Some(("delete", m)) => JournalCommand::Delete {
            id: required_id(m, "id")?,
        },
        Some(("delete-remote", m)) => JournalCommand::DeleteRemote {
            index: m
                .get_one::<usize>("index")
                .copied()
                .ok_or_else(|| Error::invalid_argument("missing <index>"))?,
            yes: m.get_flag("yes"),
        },
        Some(("export", m)) => JournalCommand::Export {
            out_dir: m.get_one::<PathBuf>("out").cloned(),
        },
        Some(("status", _)) => JournalCommand::Status,
        Some(("watch", _)) => JournalCommand::Watch,
        Some(("cache", m)) => match m.subcommand_name() {
            Some("install") => JournalCommand::CacheInstall,
            Some("activate") => JournalCommand::CacheActivate,
            Some("list") => JournalCommand::CacheList,
            other => {
                return Err(Error::invalid_argument(format!(
                    "Unknown cache command: {}",
                    other.unwrap_or("")
                )))
            }
        },
        Some((other, _)) => {
            return Err(Error::invalid_argument(format!("Unknown command: {}", other)))
        }
    };
    Ok(Cli {
        verbose,
        server,
        command,
    })
}

fn required_id(m: &clap::ArgMatches, name: &str) -> Result<u64, Error> {
    m.get_one::<u64>(name)
        .copied()
        .ok_or_else(|| Error::invalid_argument(format!("missing <{}>", name)))
}

fn outcome_from(result: Result<clap::ArgMatches, clap::Error>) -> Result<ParseOutcome, Error> {
    let matches = match result {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(ParseOutcome::Help(e.render().to_string()));
        }
        Err(e) => return Err(Error::invalid_argument(e.to_string())),
    };
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Command(matches_to_cli(&matches)?))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    outcome_from(build_clap_command().try_get_matches())
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    outcome_from(build_clap_command().try_get_matches_from(args))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}
