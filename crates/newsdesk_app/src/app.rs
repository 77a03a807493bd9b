use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use newsdesk_core::{update, Dispatcher, DispatcherConfig, Msg};
use newsdesk_engine::GatewaySettings;
use newsdesk_logging::{news_info, news_warn};

use crate::effects::EffectRunner;
use crate::input::{parse_line, Command, HELP};
use crate::render::render;

/// Runs the terminal front end until `:quit` or end of input.
pub fn run(
    dispatcher_config: DispatcherConfig,
    settings: GatewaySettings,
    tick_interval: Duration,
) -> anyhow::Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let runner = EffectRunner::new(settings, cmd_tx.clone()).context("starting engine")?;

    spawn_stdin_reader(cmd_tx.clone());
    spawn_ticker(cmd_tx.clone(), tick_interval);
    let _ = cmd_tx.send(Command::Dispatch(Msg::Activated));
    drop(cmd_tx);

    let stdout = io::stdout();
    writeln!(stdout.lock(), "{HELP}")?;

    let mut state = Dispatcher::new(dispatcher_config);
    for command in cmd_rx {
        match command {
            Command::Dispatch(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    write!(stdout.lock(), "{}", render(&state.view()))?;
                }
            }
            Command::Help => writeln!(stdout.lock(), "{HELP}")?,
            Command::Invalid(reason) => {
                news_warn!("Rejected input: {}", reason);
                writeln!(stdout.lock(), "? {reason}")?;
            }
            Command::Quit => break,
        }
    }

    news_info!("Session finished");
    Ok(())
}

fn spawn_stdin_reader(cmd_tx: mpsc::Sender<Command>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let command = match line {
                Ok(line) => parse_line(&line, Instant::now()),
                Err(err) => {
                    news_warn!("Failed to read stdin: {}", err);
                    Command::Quit
                }
            };
            let quit = command == Command::Quit;
            if cmd_tx.send(command).is_err() || quit {
                return;
            }
        }
        let _ = cmd_tx.send(Command::Quit);
    });
}

// Ticks drive the debounce timer; the loop never sleeps on its own.
fn spawn_ticker(cmd_tx: mpsc::Sender<Command>, interval: Duration) {
    thread::spawn(move || {
        while cmd_tx
            .send(Command::Dispatch(Msg::Tick(Instant::now())))
            .is_ok()
        {
            thread::sleep(interval);
        }
    });
}
