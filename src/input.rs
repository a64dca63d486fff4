use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Heading;

/// What a single input event asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Heading),
    Quit,
}

/// Non-blocking event source, drained once per tick.
pub trait InputSource {
    fn poll_events(&mut self) -> Result<Vec<Event>>;
}

pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Result<Vec<Event>> {
        let mut events = vec![];

        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }

        Ok(events)
    }
}

/// Unmapped keys and non-key events yield `None`.
pub fn translate(ev: &Event) -> Option<Command> {
    let key = match ev {
        Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => key,
        _ => return None,
    };

    if is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Heading::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Heading::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Heading::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Heading::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
