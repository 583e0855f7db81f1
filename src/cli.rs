// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive shell over [`Tracker`].
//!
//! Reads one command per line and writes human-readable results. Lines are
//! split with shell quoting rules (`signup alice "my pass"`) and parsed with
//! clap, so `help` and `<command> --help` work as usual.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::services::Tracker;
use crate::time_utils::{DATE_FORMAT, TIME_FORMAT};

/// Default duration of the `add` form.
const DEFAULT_DURATION: &str = "00:30:00";
/// Default distance (km) of the `add` form.
const DEFAULT_DISTANCE: &str = "5.00";

const PROMPT: &str = "runit> ";

#[derive(Parser, Debug)]
#[command(name = "runit", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Log in to an existing account (quote values containing spaces)
    Login { username: String, password: String },
    /// Create an account (username 3-32 chars, password 2-32 chars) and log in
    Signup { username: String, password: String },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Record an exercise
    Add {
        /// Date (yyyy-MM-dd), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Start time (HH:mm), defaults to now
        #[arg(long)]
        time: Option<String>,
        /// Duration (HH:MM:SS)
        #[arg(long, default_value = DEFAULT_DURATION)]
        duration: String,
        /// Distance in km
        #[arg(long, default_value = DEFAULT_DISTANCE)]
        distance: String,
    },
    /// List recorded exercises, most recent first
    History {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an exercise by its number in `history`
    Delete { number: usize },
    /// Show totals and averages
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented shell writing to `out`.
pub struct Shell<'a, W: Write> {
    tracker: &'a mut Tracker,
    out: W,
    show_prompt: bool,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new(tracker: &'a mut Tracker, out: W) -> Self {
        Self {
            tracker,
            out,
            show_prompt: false,
        }
    }

    /// Print a prompt before each line (for terminals).
    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input, then close the session.
    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        let mut lines = input.lines();
        loop {
            if self.show_prompt {
                write!(self.out, "{}", PROMPT)?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read input")?;
            if self.execute(&line)? == Flow::Quit {
                break;
            }
        }
        self.close()
    }

    /// Execute one input line.
    pub fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let args = match shell_words::split(line) {
            Ok(args) => args,
            Err(e) => {
                writeln!(self.out, "error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        if args.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match ShellLine::try_parse_from(args) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(self.out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        tracing::trace!(?command, "Executing shell command");
        match self.dispatch(command) {
            Ok(flow) => Ok(flow),
            Err(ShellError::App(e)) => {
                if !e.is_user_error() {
                    tracing::error!(error = %e, "Command failed");
                }
                writeln!(self.out, "Error: {}", e)?;
                Ok(Flow::Continue)
            }
            Err(ShellError::Output(e)) => Err(e),
        }
    }

    /// Log out any active user before leaving.
    pub fn close(&mut self) -> anyhow::Result<()> {
        if let Some(user) = self.tracker.logout() {
            writeln!(self.out, "logged out user '{}'", user)?;
        }
        writeln!(self.out, "closing")?;
        Ok(())
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<Flow, ShellError> {
        match command {
            ShellCommand::Login { username, password } => {
                let outcome = self.tracker.login_user(&username, &password)?;
                if outcome.is_success() {
                    writeln!(self.out, "{} logged in", username)?;
                } else {
                    writeln!(self.out, "{}", outcome.message())?;
                }
            }
            ShellCommand::Signup { username, password } => {
                let outcome = self.tracker.signup_user(&username, &password)?;
                if outcome.is_success() {
                    writeln!(self.out, "{}, {} logged in", outcome.message(), username)?;
                } else {
                    writeln!(self.out, "{}", outcome.message())?;
                }
            }
            ShellCommand::Logout => match self.tracker.logout() {
                Some(user) => writeln!(self.out, "logged out user '{}'", user)?,
                None => writeln!(self.out, "Not logged in")?,
            },
            ShellCommand::Whoami => match self.tracker.user() {
                Some(user) => writeln!(self.out, "{}", user)?,
                None => writeln!(self.out, "Not logged in")?,
            },
            ShellCommand::Add {
                date,
                time,
                duration,
                distance,
            } => {
                let now = chrono::Local::now();
                let date = date.unwrap_or_else(|| now.format(DATE_FORMAT).to_string());
                let time = time.unwrap_or_else(|| now.format(TIME_FORMAT).to_string());

                let exercise = self
                    .tracker
                    .record_exercise(&date, &time, &duration, &distance)?;
                writeln!(self.out, "Added: {}", exercise)?;
            }
            ShellCommand::History { json } => {
                let history = self.tracker.history()?;
                if json {
                    writeln!(self.out, "{}", to_json(&history)?)?;
                } else if history.is_empty() {
                    writeln!(self.out, "No exercises yet")?;
                } else {
                    for (i, exercise) in history.iter().enumerate() {
                        writeln!(self.out, "{:>3}. {}", i + 1, exercise)?;
                    }
                }
            }
            ShellCommand::Delete { number } => {
                let history = self.tracker.history()?;
                let exercise = number
                    .checked_sub(1)
                    .and_then(|i| history.get(i))
                    .ok_or_else(|| {
                        AppError::NotFound(format!(
                            "No exercise number {} ({} in history)",
                            number,
                            history.len()
                        ))
                    })?;
                self.tracker.delete_exercise(exercise)?;
                writeln!(self.out, "Deleted: {}", exercise)?;
            }
            ShellCommand::Summary { json } => {
                let statistics = self.tracker.statistics()?;
                if json {
                    writeln!(self.out, "{}", to_json(&statistics)?)?;
                } else {
                    writeln!(self.out, "{}", statistics)?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ShellError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ShellError::Output(anyhow::anyhow!("Failed to serialize output: {}", e)))
}

/// Command failure: either reported to the user, or fatal to the shell.
#[derive(Debug)]
enum ShellError {
    App(AppError),
    Output(anyhow::Error),
}

impl From<AppError> for ShellError {
    fn from(err: AppError) -> Self {
        ShellError::App(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Output(err.into())
    }
}
