//! Terminal host (default binary).
//!
//! Runs one session on a tokio runtime. The main thread polls crossterm for
//! keys, forwards them as commands, and redraws whenever the session
//! publishes a new projection. Settings come from `TETRIS_*` environment
//! variables (see `SessionConfig::from_env`).

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use tetris_rules::engine::{Session, SessionConfig};
use tetris_rules::input::{handle_key_event, should_quit};
use tetris_rules::term::TerminalRenderer;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let session = runtime.block_on(Session::spawn(SessionConfig::from_env()));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &session);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Err(e) = runtime.block_on(session.shutdown()) {
        eprintln!("[Host] Session shutdown failed: {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, session: &Session) -> Result<()> {
    let mut views = session.subscribe();
    let mut dirty = true;

    loop {
        if dirty || views.has_changed().context("session stopped")? {
            let view = views.borrow_and_update().clone();
            term.draw(&view)?;
            dirty = false;
        }

        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(command) = handle_key_event(key) {
                    session.blocking_send(command)?;
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
