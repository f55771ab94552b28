//! Interactive preview widget using crossterm.
//!
//! [`preview`] draws the selection controls (family, weight, italic, text,
//! apply, reset) and a preview line styled with the applied font, and drives
//! a [`Session`] from key presses.

use crate::error::Result;
use crate::render::TextStyle;
use crate::session::Session;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{self, Stylize},
    terminal, ExecutableCommand, QueueableCommand,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

// ── Helpers ──────────────────────────────────────────────────────────────

/// Enter raw mode and hide the cursor; returns a guard that restores state
/// when dropped.
struct RawGuard {
    cursor_hidden: bool,
}

impl RawGuard {
    fn enter(hide_cursor: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if hide_cursor {
            io::stdout().execute(cursor::Hide)?;
        }
        Ok(RawGuard {
            cursor_hidden: hide_cursor,
        })
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = io::stdout().execute(cursor::Show);
        }
        let _ = terminal::disable_raw_mode();
    }
}

/// Move to the beginning of the current line, then clear everything below
/// (inclusive). Use this before a full redraw.
fn move_to_start_and_clear(out: &mut impl Write) -> io::Result<()> {
    out.queue(cursor::MoveToColumn(0))?;
    out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
    Ok(())
}

/// Move up `n` lines from the current position.
fn move_up(out: &mut impl Write, n: u16) -> io::Result<()> {
    if n > 0 {
        out.queue(cursor::MoveUp(n))?;
    }
    Ok(())
}

/// Print the final "✔ prompt value" line after the widget closes.
fn print_confirm(out: &mut impl Write, prompt: &str, value: &str) -> io::Result<()> {
    out.queue(style::Print(style::style("✔ ").green().bold()))?;
    out.queue(style::Print(style::style(prompt).bold()))?;
    out.queue(style::Print(" "))?;
    out.queue(style::Print(style::style(value).cyan()))?;
    out.queue(style::Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

/// Step through `items` from `current`, wrapping at both ends.
fn cycle<T: PartialEq + Clone>(items: &[T], current: &T, forward: bool) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let idx = items.iter().position(|i| i == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % items.len()
    } else {
        (idx + items.len() - 1) % items.len()
    };
    items.get(next).cloned()
}

// ── preview ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Family,
    Weight,
    Italic,
    Text,
    Apply,
    Reset,
}

const ROWS: [Row; 6] = [
    Row::Family,
    Row::Weight,
    Row::Italic,
    Row::Text,
    Row::Apply,
    Row::Reset,
];

/// One-line note under the controls.
enum Notice {
    None,
    Saved,
    WasReset,
    ItalicUnavailable,
}

/// Interactive preview. Returns when the user presses Esc.
///
/// Up/Down move between controls, Left/Right change family and weight,
/// Space/Enter toggle italic or press a button, typing on the text row edits
/// the sample text.
pub fn preview(session: &mut Session) -> std::result::Result<(), String> {
    preview_inner(session).map_err(|e| e.to_string())
}

fn preview_inner(session: &mut Session) -> Result<()> {
    let guard = RawGuard::enter(true)?;
    let mut out = io::stdout();

    let mut cursor: usize = 0;
    let mut notice = Notice::None;
    let mut last_lines: u16 = 0;

    last_lines = render_preview(&mut out, session, ROWS[cursor], &notice, last_lines)?;

    loop {
        let now = Instant::now();
        let timeout = session
            .render()
            .time_until_next(now)
            .unwrap_or(Duration::from_secs(60));

        if !event::poll(timeout)? {
            // Only timers fired: drop expired stylesheet registrations.
            if session.tick(Instant::now()) > 0 {
                last_lines = render_preview(&mut out, session, ROWS[cursor], &notice, last_lines)?;
            }
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => key,
            Event::Resize(..) => {
                last_lines = render_preview(&mut out, session, ROWS[cursor], &notice, last_lines)?;
                continue;
            }
            _ => continue,
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            drop(guard);
            std::process::exit(130);
        }

        let now = Instant::now();
        let row = ROWS[cursor];
        notice = Notice::None;

        match key.code {
            KeyCode::Esc => break,
            KeyCode::Up => cursor = cursor.saturating_sub(1),
            KeyCode::Down => {
                if cursor + 1 < ROWS.len() {
                    cursor += 1;
                }
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match row {
                    Row::Family => {
                        let families: Vec<String> =
                            session.catalog().families().map(str::to_string).collect();
                        let current = session.selection().font_family.clone();
                        if let Some(next) = cycle(&families, &current, forward) {
                            session.select_family(&next, now)?;
                        }
                    }
                    Row::Weight => {
                        let weights = session.weight_options();
                        let current = session.selection().font_weight;
                        if let Some(next) = cycle(&weights, &current, forward) {
                            session.select_weight(next, now)?;
                        }
                    }
                    _ => {}
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter if row != Row::Text => match row {
                Row::Italic => {
                    if !session.toggle_italic(now)? {
                        notice = Notice::ItalicUnavailable;
                    }
                }
                Row::Apply => {
                    session.apply(now)?;
                    notice = Notice::Saved;
                }
                Row::Reset => {
                    session.reset(now)?;
                    notice = Notice::WasReset;
                }
                _ => {}
            },
            KeyCode::Backspace if row == Row::Text => {
                let mut text = session.selection().text.clone();
                text.pop();
                session.edit_text(text)?;
            }
            KeyCode::Char(c) if row == Row::Text => {
                let mut text = session.selection().text.clone();
                text.push(c);
                session.edit_text(text)?;
            }
            _ => {}
        }

        session.tick(now);
        last_lines = render_preview(&mut out, session, ROWS[cursor], &notice, last_lines)?;
    }

    move_up(&mut out, last_lines)?;
    move_to_start_and_clear(&mut out)?;
    let selection = session.selection();
    print_confirm(
        &mut out,
        "Font:",
        &format!("{} {}", selection.font_family, selection.label()),
    )?;
    Ok(())
}

/// Apply the surface style to `text` with the attributes a terminal has.
fn styled(text: &str, style: Option<&TextStyle>) -> style::StyledContent<String> {
    let mut content = style::style(text.to_string());
    if let Some(s) = style {
        if s.is_bold() {
            content = content.bold();
        }
        if s.italic {
            content = content.italic();
        }
    }
    content
}

/// Render the widget. Returns the line count so the next redraw knows how
/// far to move up.
fn render_preview(
    out: &mut io::Stdout,
    session: &Session,
    cursor: Row,
    notice: &Notice,
    prev_lines: u16,
) -> io::Result<u16> {
    move_up(out, prev_lines)?;
    move_to_start_and_clear(out)?;

    let selection = session.selection();
    let italic_enabled = session.italic_enabled();

    out.queue(style::Print(style::style("? ").green().bold()))?;
    out.queue(style::Print(style::style("Preview font:").bold()))?;
    out.queue(style::Print("\r\n"))?;
    let mut lines: u16 = 1;

    for row in ROWS {
        let text = match row {
            Row::Family => format!("    Family: < {} >", selection.font_family),
            Row::Weight => {
                let weights: Vec<String> = session
                    .weight_options()
                    .iter()
                    .map(|w| {
                        if *w == selection.font_weight {
                            format!("[{w}]")
                        } else {
                            w.to_string()
                        }
                    })
                    .collect();
                format!("    Weight: < {} >", weights.join(" "))
            }
            Row::Italic => {
                let checkbox = if selection.is_italic { "[x]" } else { "[ ]" };
                format!("    {checkbox} Italic")
            }
            Row::Text => {
                if selection.text.is_empty() {
                    "    Text: ".to_string()
                } else {
                    format!("    Text: {}", selection.text)
                }
            }
            Row::Apply => "    > Apply".to_string(),
            Row::Reset => "    > Reset".to_string(),
        };

        if row == cursor {
            out.queue(style::Print(style::style(text).blue()))?;
        } else if row == Row::Italic && !italic_enabled {
            out.queue(style::Print(style::style(text).dark_grey()))?;
        } else {
            out.queue(style::Print(text))?;
        }
        if row == Row::Text && selection.text.is_empty() {
            out.queue(style::Print(style::style("(type sample text)").dark_grey()))?;
        }
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    // Preview line in the applied style.
    let sample = if selection.text.is_empty() {
        "The quick brown fox jumps over the lazy dog"
    } else {
        selection.text.as_str()
    };
    out.queue(style::Print("\r\n  "))?;
    out.queue(style::Print(styled(sample, session.render().style())))?;
    out.queue(style::Print("\r\n"))?;
    lines += 2;

    let status = match session.render().style() {
        Some(s) => format!("  {}", s.to_css()),
        None => String::new(),
    };
    let stylesheets = session.render().stylesheets();
    let loading = if stylesheets.is_empty() {
        "loaded".to_string()
    } else {
        format!("{} stylesheet(s) registered", stylesheets.len())
    };
    out.queue(style::Print(
        style::style(format!("{status}  ({loading})")).dark_grey(),
    ))?;
    out.queue(style::Print("\r\n"))?;
    lines += 1;

    let note = match notice {
        Notice::None => None,
        Notice::Saved => Some(style::style("  Saved.".to_string()).green()),
        Notice::WasReset => Some(style::style("  Restored defaults.".to_string()).green()),
        Notice::ItalicUnavailable => Some(
            style::style(format!(
                "  Sorry, {} {} has no italic :(",
                selection.font_family, selection.font_weight
            ))
            .red(),
        ),
    };
    if let Some(note) = note {
        out.queue(style::Print(note))?;
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    out.queue(style::Print(
        style::style("  ↑/↓ move · ←/→ change · space toggles · esc to finish").dark_grey(),
    ))?;
    out.queue(style::Print("\r\n"))?;
    lines += 1;

    out.flush()?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_ways() {
        let items = [400u16, 600, 700];
        assert_eq!(cycle(&items, &700, true), Some(400));
        assert_eq!(cycle(&items, &400, false), Some(700));
        assert_eq!(cycle(&items, &600, true), Some(700));
    }

    #[test]
    fn cycle_starts_from_first_when_current_is_missing() {
        let items = ["Roboto".to_string(), "Open Sans".to_string()];
        assert_eq!(
            cycle(&items, &"Lato".to_string(), true),
            Some("Open Sans".to_string())
        );
        assert_eq!(cycle::<u16>(&[], &400, true), None);
    }
}
