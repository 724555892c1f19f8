use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEventKind,
    poll, read,
};
use crossterm::style::{
    Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};

use crate::terminal::terminal_event::{
    KeyCode, KeyEvent, MouseEvent, MouseKind, TerminalEvent,
};
use crate::ui::span::SpanLine;
use crate::ui::style::{Color, Style};

#[derive(Debug, Clone, Copy)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

pub struct Terminal {
    stdout: Stdout,
    size: Size,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let stdout = io::stdout();
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            size: Size { width, height },
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    pub fn exit_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    pub fn enable_mouse_capture(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnableMouseCapture)
    }

    pub fn disable_mouse_capture(&mut self) -> io::Result<()> {
        execute!(self.stdout, DisableMouseCapture)
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Hide)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show)
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(
            self.stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        poll(timeout)
    }

    /// Reads the next event the picker cares about; unrelated events
    /// (key releases, wheel scroll, non-left buttons) are skipped.
    pub fn read_event(&mut self) -> io::Result<Option<TerminalEvent>> {
        match read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
                Ok(Some(TerminalEvent::Key(map_key_event(key))))
            }
            Event::Mouse(mouse) => Ok(map_mouse_event(mouse).map(TerminalEvent::Mouse)),
            Event::Resize(width, height) => {
                self.size = Size { width, height };
                Ok(Some(TerminalEvent::Resize { width, height }))
            }
            _ => Ok(None),
        }
    }

    /// Repaints the given lines from the top-left corner.
    pub fn draw_lines(&mut self, lines: &[SpanLine]) -> io::Result<()> {
        for (row, line) in lines.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, row as u16),
                terminal::Clear(terminal::ClearType::CurrentLine)
            )?;
            for span in line {
                queue_style(&mut self.stdout, span.style)?;
                queue!(
                    self.stdout,
                    Print(span.text.as_str()),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
            }
        }
        self.stdout.flush()
    }
}

fn queue_style(stdout: &mut Stdout, style: Style) -> io::Result<()> {
    if let Some(color) = style.color {
        queue!(stdout, SetForegroundColor(map_color(color)))?;
    }
    if let Some(color) = style.background {
        queue!(stdout, SetBackgroundColor(map_color(color)))?;
    }
    if style.bold {
        queue!(stdout, SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn map_color(color: Color) -> CtColor {
    match color {
        Color::Reset => CtColor::Reset,
        Color::Black => CtColor::Black,
        Color::Red => CtColor::Red,
        Color::Green => CtColor::Green,
        Color::Yellow => CtColor::Yellow,
        Color::Blue => CtColor::Blue,
        Color::Magenta => CtColor::Magenta,
        Color::Cyan => CtColor::Cyan,
        Color::White => CtColor::White,
        Color::DarkGrey => CtColor::DarkGrey,
    }
}

fn map_key_event(key: crossterm::event::KeyEvent) -> KeyEvent {
    let code = match key.code {
        crossterm::event::KeyCode::Char(c) => KeyCode::Char(c),
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        _ => KeyCode::Other,
    };
    KeyEvent::new(code)
}

fn map_mouse_event(mouse: crossterm::event::MouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => MouseKind::Down,
        MouseEventKind::Drag(MouseButton::Left) => MouseKind::Drag,
        MouseEventKind::Up(MouseButton::Left) => MouseKind::Up,
        _ => return None,
    };
    Some(MouseEvent {
        kind,
        column: mouse.column,
        row: mouse.row,
    })
}
