//! Session actor
//!
//! One tokio task owns the [`GameState`]. Player commands and gravity ticks
//! are serialized through that task, so every mutation runs to completion
//! before the next begins. After each one the task publishes a fresh
//! [`Projection`] on a watch channel.

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use tetris_rules_core::types::{GameCommand, Phase};
use tetris_rules_core::{GameState, Projection};

use crate::config::SessionConfig;
use crate::event_log::{EventLog, EventRecord};
use crate::gravity::GravityTimer;

/// Handle to a running session. Dropping it stops the game task.
#[derive(Debug)]
pub struct Session {
    commands: Option<mpsc::Sender<GameCommand>>,
    projection: watch::Receiver<Projection>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    log_writer: Option<JoinHandle<()>>,
}

impl Session {
    /// Spawn a session configured by `config`.
    ///
    /// Opens the event log if one is configured; a log that cannot be opened
    /// is reported and the session runs without it.
    pub async fn spawn(config: SessionConfig) -> Self {
        let mut log_writer = None;
        let log = match config.event_log_path.as_deref() {
            Some(path) => match EventLog::open(path).await {
                Ok((log, writer)) => {
                    log_writer = Some(writer);
                    Some(log)
                }
                Err(e) => {
                    eprintln!("[Session] Event log disabled: {:#}", e);
                    None
                }
            },
            None => None,
        };

        let mut session = Self::spawn_with(GameState::new(config.seed), &config, log);
        session.log_writer = log_writer;
        session
    }

    /// Spawn a session around an existing state.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn spawn_with(mut state: GameState, config: &SessionConfig, log: Option<EventLog>) -> Self {
        if config.autostart && state.phase() != Phase::Running {
            state.start();
            if let Some(log) = &log {
                log.record(EventRecord::Started { seed: config.seed });
            }
        }

        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let (projection_tx, projection_rx) = watch::channel(state.projection());
        let (stop_tx, stop_rx) = oneshot::channel();

        let actor = Actor {
            state,
            seed: config.seed,
            gravity: GravityTimer::new(),
            log,
            projection: projection_tx,
        };
        let task = tokio::spawn(actor.run(command_rx, stop_rx));

        Self {
            commands: Some(command_tx),
            projection: projection_rx,
            stop: Some(stop_tx),
            task: Some(task),
            log_writer: None,
        }
    }

    /// Queue a command, waiting for buffer space.
    pub async fn send(&self, command: GameCommand) -> Result<()> {
        self.sender()?
            .send(command)
            .await
            .map_err(|_| anyhow!("session closed"))
    }

    /// Queue a command without waiting; fails when the buffer is full.
    pub fn try_send(&self, command: GameCommand) -> Result<()> {
        self.sender()?
            .try_send(command)
            .map_err(|e| anyhow!("failed to queue {}: {}", command.as_str(), e))
    }

    /// Queue a command from outside the runtime (e.g. an input thread).
    pub fn blocking_send(&self, command: GameCommand) -> Result<()> {
        self.sender()?
            .blocking_send(command)
            .map_err(|_| anyhow!("session closed"))
    }

    /// A sender that can be moved to another task or thread.
    pub fn command_sender(&self) -> Result<mpsc::Sender<GameCommand>> {
        self.sender().cloned()
    }

    fn sender(&self) -> Result<&mpsc::Sender<GameCommand>> {
        self.commands.as_ref().ok_or_else(|| anyhow!("session closed"))
    }

    /// Latest published projection
    pub fn projection(&self) -> Projection {
        self.projection.borrow().clone()
    }

    /// Receiver that is notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Projection> {
        self.projection.clone()
    }

    /// Stop the game task and wait for it (and the event log) to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        self.commands.take();
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            task.await?;
        }
        if let Some(writer) = self.log_writer.take() {
            writer.await?;
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// State owned by the session task.
struct Actor {
    state: GameState,
    seed: Option<u32>,
    gravity: GravityTimer,
    log: Option<EventLog>,
    projection: watch::Sender<Projection>,
}

impl Actor {
    async fn run(mut self, mut commands: mpsc::Receiver<GameCommand>, mut stop: oneshot::Receiver<()>) {
        self.gravity.sync(&self.state);

        loop {
            tokio::select! {
                biased;
                _ = &mut stop => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = self.gravity.tick() => self.state.gravity_step(),
            }

            self.after_step();
        }

        self.gravity.disarm();
    }

    fn handle_command(&mut self, command: GameCommand) {
        let before = self.state.phase();
        self.state.apply(command);

        let Some(log) = &self.log else {
            return;
        };
        match command {
            GameCommand::Reset => log.record(EventRecord::Reset),
            GameCommand::Start if before != Phase::Running && before != Phase::Paused => {
                log.record(EventRecord::Started { seed: self.seed })
            }
            _ => {}
        }
    }

    /// Log the lock (if any), retime gravity, and publish.
    fn after_step(&mut self) {
        if let Some(event) = self.state.take_last_event() {
            if let Some(log) = &self.log {
                for record in EventRecord::from_lock(&event, &self.state) {
                    log.record(record);
                }
            }
        }

        self.gravity.sync(&self.state);
        self.projection.send_replace(self.state.projection());
    }
}
