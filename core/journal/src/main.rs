mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use std::sync::mpsc;
use std::sync::Arc;

use cli::{parse_args, print_completion, render_view, Cli, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{JournalCommand, RemoteDeleteOutcome, SubmissionForm};
use ports::inbound::UseCaseRunner;
use wiring::{wire_journal, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, cli: Cli) -> Result<i32, Error> {
        let command_name = cli.command.name();
        let _ = self.app.log.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.dispatch(cli.command);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.log.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.log.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

impl Runner {
    fn dispatch(&self, command: JournalCommand) -> Result<i32, Error> {
        let journal = &self.app.journal;
        match command {
            JournalCommand::Add {
                title,
                content,
                tags,
            } => {
                let outcome = journal.submit(SubmissionForm::new(title, content, tags))?;
                let target = if outcome.remote_saved {
                    "server + local"
                } else {
                    "local only"
                };
                println!("Saved #{} ({})", outcome.entry.id, target);
                Ok(0)
            }
            JournalCommand::List { json } => {
                let view = journal.load();
                if json {
                    println!("{}", serde_json::to_string_pretty(&view.entries)?);
                } else {
                    print!("{}", render_view(&view));
                }
                Ok(0)
            }
            JournalCommand::Show { id } => {
                let entry = journal.show(id)?;
                println!("{}", entry.format_for_copy());
                Ok(0)
            }
            JournalCommand::Delete { id } => {
                journal.delete_local(id)?;
                Ok(0)
            }
            JournalCommand::DeleteRemote { index, .. } => match journal.delete_remote(index)? {
                RemoteDeleteOutcome::Cancelled => {
                    eprintln!("Cancelled.");
                    Ok(0)
                }
                RemoteDeleteOutcome::Deleted(view) => {
                    println!("Total Server Reflections: {}", view.server_count);
                    Ok(0)
                }
            },
            JournalCommand::Export { out_dir } => {
                let dir = match out_dir {
                    Some(d) => d,
                    None => self.app.current_dir()?,
                };
                let path = journal.export(&dir)?;
                println!("{}", path.display());
                Ok(0)
            }
            JournalCommand::Status => {
                let state = self.app.connectivity_monitor().check();
                println!("{}", state.label());
                Ok(if state.is_online() { 0 } else { 1 })
            }
            JournalCommand::Watch => self.watch(),
            JournalCommand::CacheInstall => {
                let count = self.app.cache.install()?;
                println!("Installed {} assets into {}", count, self.app.cache.cache_name());
                Ok(0)
            }
            JournalCommand::CacheActivate => {
                for name in self.app.cache.activate()? {
                    println!("Deleted {}", name);
                }
                Ok(0)
            }
            JournalCommand::CacheList => {
                let current = self.app.cache.cache_name();
                for name in self.app.cache.generations()? {
                    if name == current {
                        println!("{} (current)", name);
                    } else {
                        println!("{}", name);
                    }
                }
                Ok(0)
            }
        }
    }

    /// ハートビートを Ctrl+C まで回す
    fn watch(&self) -> Result<i32, Error> {
        let monitor = Arc::new(self.app.connectivity_monitor());
        let mut heartbeat = adapter::Heartbeat::start(
            Arc::clone(&monitor),
            Arc::clone(&self.app.hardware),
            self.app.config.heartbeat_interval(),
        )?;
        let (tx, rx) = mpsc::channel::<()>();
        ctrlc::set_handler(move || {
            let _ = tx.send(());
        })
        .map_err(|e| Error::system(format!("failed to set Ctrl+C handler: {}", e)))?;
        eprintln!(
            "Watching {} every {} ms (Ctrl+C to stop)",
            self.app.config.server_url, self.app.config.heartbeat_interval_ms
        );
        let _ = rx.recv();
        heartbeat.cancel();
        Ok(0)
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

pub fn run() -> Result<i32, Error> {
    let cli = match parse_args()? {
        ParseOutcome::Command(cli) => cli,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
        ParseOutcome::Help(text) => {
            print!("{}", text);
            return Ok(0);
        }
    };
    let app = wire_journal(&cli)?;
    let runner = Runner { app };
    runner.run(cli)
}

fn print_usage() {
    eprintln!("Usage: journal [-v] [--server <url>] [add|list|show|delete|delete-remote|export|status|watch|cache] ...");
}
