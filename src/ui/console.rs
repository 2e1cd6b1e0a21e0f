use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::engine::synthetic::WaitingIndicator;
use crate::model::game_state::GameState;
use crate::ui::presenter::{ChoiceOption, ChoicePresenter, PresenterError};

/// Numbered menus on a line-oriented terminal. `q` or end of input cancels.
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
}

impl ConsolePresenter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, PresenterError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PresenterError::Cancelled);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> ChoicePresenter for ConsolePresenter<R, W> {
    fn present_choice<T: Clone>(
        &mut self,
        prompt: &str,
        options: Vec<ChoiceOption<T>>,
    ) -> Result<T, PresenterError> {
        if options.is_empty() {
            return Err(PresenterError::Cancelled);
        }

        writeln!(self.output, "\n{prompt}")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, option.label)?;
        }

        loop {
            write!(self.output, "Choose 1-{} (q to quit): ", options.len())?;
            self.output.flush()?;

            let answer = self.read_line()?;
            if answer.eq_ignore_ascii_case("q") {
                return Err(PresenterError::Cancelled);
            }

            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    return Ok(options[n - 1].value.clone());
                }
                _ => {
                    warn!(%answer, "invalid menu selection");
                    writeln!(self.output, "Please enter a number from the list.")?;
                }
            }
        }
    }

    fn ask_text(&mut self, prompt: &str) -> Result<String, PresenterError> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn announce(&mut self, state: &GameState) {
        if let Err(e) = writeln!(self.output, "\n{state}") {
            warn!(error = %e, "failed to print game state");
        }
    }
}

/// Progress line on stderr while option workers run.
pub struct ConsoleSpinner;

impl WaitingIndicator for ConsoleSpinner {
    fn tick(&self, completed: usize, total: usize) {
        eprint!("\rWeaving options... {completed}/{total}");
        let _ = io::stderr().flush();
    }

    fn finish(&self) {
        eprintln!();
    }
}
