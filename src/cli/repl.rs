//! cli::repl
//!
//! The interactive prompt loop.
//!
//! Built on rustyline for history and line editing. The prompt reflects
//! the selected ticket (`vtix/TT9886=> `). Ctrl-C clears the current
//! line; ctrl-d quits.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::runtime::Runtime;

use super::commands::{self, ControlFlow};
use crate::core::App;
use crate::ui::output;

/// Run the prompt loop until `quit` or EOF.
pub fn run(app: &mut App, rt: &Runtime) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline(&app.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match commands::dispatch(app, rt, line) {
                    Ok(ControlFlow::Continue) => {}
                    Ok(ControlFlow::Quit) => break,
                    Err(e) => output::error(e),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    output::print("Goodbye", app.verbosity);
    Ok(())
}
