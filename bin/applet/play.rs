use crate::io::Io;
use anyhow::{ensure, Error as Anyhow};
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::chess::{Coordinates, GameState, ParseCoordinatesError, ParseSquareError, Square};
use lib::game::{Mode, Session};
use std::io::{stdin, stdout, ErrorKind, Read, Write};
use std::{fs, path::PathBuf, str::FromStr};
use tracing::{info, instrument};

/// Play a game of chess on the terminal.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The game mode, only `local` games can be played on the terminal.
    #[clap(short, long, default_value_t)]
    mode: Mode,

    /// Where to write the transcript of the game once it's over.
    #[clap(short, long)]
    export: Option<PathBuf>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Command {
    Move(Coordinates),
    Moves(Square),
    Undo,
    Redo,
    Reset,
    Export,
    Quit,
}

#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display(fmt = "unknown command `{_0}`")]
    #[from(ignore)]
    Unknown(#[error(not(source))] String),
    #[display(fmt = "expected a square")]
    Square(ParseSquareError),
    #[display(fmt = "expected a move such as `e2e4`")]
    Move(ParseCoordinatesError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();

        match (words.next(), words.next(), words.next()) {
            (Some("moves"), None, None) => Err(ParseCommandError::Unknown(s.trim().into())),
            (Some("moves"), Some(sq), None) => Ok(Command::Moves(sq.parse()?)),
            (Some("undo"), None, None) => Ok(Command::Undo),
            (Some("redo"), None, None) => Ok(Command::Redo),
            (Some("reset"), None, None) => Ok(Command::Reset),
            (Some("export"), None, None) => Ok(Command::Export),
            (Some("quit"), None, None) => Ok(Command::Quit),
            (Some(c), None, None) if c.len() >= 4 && c.as_bytes()[0].is_ascii_lowercase() => {
                Ok(Command::Move(c.parse()?))
            }
            _ => Err(ParseCommandError::Unknown(s.trim().into())),
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut io = Io::new(stdout().lock(), stdin().lock());
        let state = self.run(&mut io)?;

        if let Some(path) = &self.export {
            fs::write(path, state.transcript().to_string())?;
            info!(path = %path.display(), "exported the transcript");
        }

        Ok(())
    }

    fn run<W: Write, R: Read>(&self, io: &mut Io<W, R>) -> Result<GameState, Anyhow> {
        ensure!(!self.mode.is_remote(), "remote games need a room to play in");
        let mut session = Session::new(self.mode, ());
        show(io, &session)?;

        loop {
            io.prompt("> ")?;

            let line = match io.recv() {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };

            if line.trim().is_empty() {
                continue;
            }

            match line.parse() {
                Err(e) => io.send(format_args!("error: {e}"))?,

                Ok(Command::Quit) => break,

                Ok(Command::Export) => io.prompt(session.state().transcript())?,

                Ok(Command::Moves(sq)) => {
                    let moves: Vec<_> = session.moves_from(sq).map(|m| m.to_string()).collect();
                    io.send(moves.join(" "))?;
                }

                Ok(Command::Move(c)) => match session.make(c) {
                    Ok(_) => show(io, &session)?,
                    Err(e) => io.send(format_args!("error: {e}"))?,
                },

                Ok(Command::Undo) => match session.undo() {
                    Ok(()) => show(io, &session)?,
                    Err(e) => io.send(format_args!("error: {e}"))?,
                },

                Ok(Command::Redo) => match session.redo() {
                    Ok(()) => show(io, &session)?,
                    Err(e) => io.send(format_args!("error: {e}"))?,
                },

                Ok(Command::Reset) => {
                    session.reset();
                    show(io, &session)?;
                }
            }
        }

        io.flush()?;
        Ok(session.state().clone())
    }
}

fn show<W: Write, R: Read>(io: &mut Io<W, R>, session: &Session) -> Result<(), Anyhow> {
    let state = session.state();
    io.send(state.position().board())?;

    match state.outcome() {
        Some(o) => io.send(o)?,
        None if state.position().is_check() => io.send(format_args!("{} to move, check", state.position().turn()))?,
        None => io.send(format_args!("{} to move", state.position().turn()))?,
    }

    Ok(())
}
