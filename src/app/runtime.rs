use std::path::PathBuf;
use std::time::Duration;

use crate::app::AppError;
use crate::app::command::map_key_to_command;
use crate::app::state::AppState;
use crate::terminal::{Terminal, TerminalEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct Runtime {
    state: AppState,
    terminal: Terminal,
}

impl Runtime {
    pub fn new(state: AppState, terminal: Terminal) -> Self {
        Self { state, terminal }
    }

    /// Runs until the user quits or picks a folder; returns the picked
    /// folder.
    pub fn run(mut self) -> Result<Option<PathBuf>, AppError> {
        self.terminal.enter()?;

        let run_result = self.event_loop();
        let exit_result = self.terminal.exit();
        run_result?;
        exit_result?;

        Ok(self.state.chosen().map(PathBuf::from))
    }

    fn event_loop(&mut self) -> Result<(), AppError> {
        self.render()?;

        while !self.state.should_exit {
            let Some(event) = self.terminal.poll_event(POLL_INTERVAL)? else {
                continue;
            };
            let render_requested = match event {
                TerminalEvent::Resize { .. } => true,
                TerminalEvent::Key(key) => {
                    let command = map_key_to_command(key);
                    self.state.reduce(command).inspect_err(|err| {
                        tracing::error!(error = %err, "search controller failed");
                    })?
                }
            };

            if render_requested && !self.state.should_exit {
                self.render()?;
            }
        }

        Ok(())
    }

    fn render(&mut self) -> Result<(), AppError> {
        let frame = self.state.view().render(self.terminal.size());
        self.terminal.render_frame(&frame)?;
        Ok(())
    }
}
