use std::io;
use std::time::Duration;

use spindle::terminal::{KeyCode, PointerTracker, Terminal, TerminalEvent};
use spindle::ui::span::Span;
use spindle::widgets::traits::{Drawable, Interactive, RenderContext, WidgetAction};
use spindle::{PickerSetup, WheelPicker};

const SETUP: &str = "\
config:
  visible_range: 5
  full_range: 90
columns:
  - type: date
  - type: hour
    mode: 12
  - type: minute
    increment: 5
  - type: meridiem
";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    terminal.enter_raw_mode()?;
    terminal.enable_mouse_capture()?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    let result = event_loop(&mut terminal);

    terminal.show_cursor()?;
    terminal.disable_mouse_capture()?;
    terminal.exit_raw_mode()?;

    result
}

fn event_loop(terminal: &mut Terminal) -> io::Result<()> {
    let setup = PickerSetup::from_yaml(SETUP).map_err(io::Error::other)?;
    let mut picker = WheelPicker::from_field(
        "when",
        "Drag the wheels; q quits",
        &setup,
        "2024-05-01 09:05:00",
    )
    .map_err(io::Error::other)?
    .with_field_target("datetime");

    let mut tracker = PointerTracker::new();
    let mut field_value = picker.field_text().to_string();
    let mut render_requested = true;

    loop {
        if terminal.poll(Duration::from_millis(33))? {
            match terminal.read_event()? {
                Some(TerminalEvent::Key(key)) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {}
                },
                Some(TerminalEvent::Mouse(mouse)) => {
                    if let Some(pointer) = tracker.track(mouse) {
                        let result = picker.on_pointer(&pointer).map_err(io::Error::other)?;
                        apply_actions(&mut field_value, &result.actions);
                        render_requested |= result.request_render;
                    }
                }
                Some(TerminalEvent::Resize { .. }) => render_requested = true,
                None => {}
            }
        }

        let result = picker.on_tick().map_err(io::Error::other)?;
        apply_actions(&mut field_value, &result.actions);
        render_requested |= result.request_render;

        if render_requested {
            draw(terminal, &picker, &field_value)?;
            render_requested = false;
        }
    }

    Ok(())
}

fn apply_actions(field_value: &mut String, actions: &[WidgetAction]) {
    for action in actions {
        let WidgetAction::ValueChanged { change } = action;
        if let Some(text) = change.value.as_text() {
            *field_value = text.to_string();
        }
    }
}

fn draw(terminal: &mut Terminal, picker: &WheelPicker, field_value: &str) -> io::Result<()> {
    let mut lines = picker.draw(&RenderContext::focused("when")).lines;
    lines.push(Vec::new());
    lines.push(vec![Span::new(format!("datetime: {field_value}"))]);
    terminal.draw_lines(&lines)
}
