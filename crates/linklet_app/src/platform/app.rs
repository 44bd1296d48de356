use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use linklet_core::{update, AppState, Msg};
use linklet_logging::{linklet_debug, linklet_error, linklet_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{parse_line, Command};
use super::ui::render::{render, HELP};

/// Everything the main loop reacts to, from the keyboard or the engine.
pub enum AppEvent {
    Input(Command),
    Core(Msg),
    InputClosed,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.client_settings(), event_tx.clone())
        .inspect_err(|err| linklet_error!("engine start-up failed: {}", err))
        .context("starting the request engine")?;
    spawn_input_reader(event_tx);

    let mut app = App {
        state: AppState::new(config.short_link_base_url),
        runner,
    };
    app.dispatch(Msg::LinksRequested);
    app.dispatch(Msg::HealthRequested);

    let mut stdout = io::stdout().lock();
    app.state.consume_dirty();
    writeln!(stdout, "Type 'help' for commands.")?;
    app.redraw(&mut stdout)?;

    while let Ok(first) = event_rx.recv() {
        let mut redraw = false;
        let mut prompt = false;
        let mut quit = false;

        for event in std::iter::once(first).chain(event_rx.try_iter()) {
            match event {
                AppEvent::Core(msg) => app.dispatch(msg),
                AppEvent::Input(Command::Msgs(msgs)) => {
                    msgs.into_iter().for_each(|msg| app.dispatch(msg));
                    redraw = true;
                }
                AppEvent::Input(Command::Help) => {
                    writeln!(stdout, "{HELP}")?;
                    prompt = true;
                }
                AppEvent::Input(Command::Invalid(message)) => {
                    writeln!(stdout, "{message}")?;
                    prompt = true;
                }
                AppEvent::Input(Command::Quit) | AppEvent::InputClosed => {
                    quit = true;
                    break;
                }
            }
        }

        if quit {
            break;
        }
        if app.state.consume_dirty() || redraw {
            app.redraw(&mut stdout)?;
        } else if prompt {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
    }

    linklet_info!("linklet exiting");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        linklet_debug!("dispatch {:?}", msg);
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn redraw(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}> ", render(&self.state.view()))?;
        out.flush()
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if event_tx.send(AppEvent::Input(parse_line(&line))).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}
