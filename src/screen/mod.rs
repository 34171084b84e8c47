pub mod banner;
pub mod login;
pub mod signup;

use std::borrow::Cow;

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::prelude::{Color, Masked, Modifier, Span, Style, Widget};
use ratatui::widgets::{Block, Paragraph};
use tui_input::Input;

use crate::router::ScreenChange;

pub trait OnTick {
    fn on_tick(&mut self);

    /// Called instead of [`OnTick::on_tick`] while input is blocked by a
    /// notice. Pending ticks are dropped so timers stand still.
    fn skip_ticks(&mut self) {}
}

pub trait OnKeyEvent {
    fn on_key_event(&mut self, key: KeyEvent) -> ScreenChange;
}

pub fn highlight<'a>(text: impl Into<Cow<'a, str>>, needed: bool) -> Span<'a> {
    if needed {
        Span::styled(text, Style::default().bg(Color::White).fg(Color::Black))
    } else {
        Span::styled(text, Style::default())
    }
}

/// A bordered single-line text input with a label, placeholder and
/// optional masking.
pub struct TextField<'a> {
    pub label: &'a str,
    pub placeholder: &'a str,
    pub input: &'a Input,
    pub masked: bool,
    pub focused: bool,
}

impl TextField<'_> {
    /// Where the terminal cursor goes when this field is focused.
    pub fn cursor(&self, area: Rect) -> Position {
        let scroll = self.scroll(area);
        (
            area.x + (self.cursor_column().saturating_sub(scroll)) as u16 + 1,
            area.y + 1,
        )
            .into()
    }

    /// Masked text draws one cell per character, whatever its display width.
    fn cursor_column(&self) -> usize {
        if self.masked {
            self.input.cursor()
        } else {
            self.input.visual_cursor()
        }
    }

    fn scroll(&self, area: Rect) -> usize {
        let width = area.width.saturating_sub(2) as usize;
        if self.masked {
            self.input.cursor().saturating_sub(width)
        } else {
            self.input.visual_scroll(width)
        }
    }
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::bordered().title(self.label);
        if self.focused {
            block = block.border_style(Style::default().fg(Color::LightGreen));
        }
        let value = self.input.value();
        let text = if value.is_empty() {
            Span::styled(
                self.placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if self.masked {
            Span::styled(Masked::new(value, '*'), Color::White)
        } else {
            Span::styled(value, Color::White)
        };
        let scroll = self.scroll(area);
        Paragraph::new(text)
            .scroll((0, scroll as u16))
            .block(block)
            .render(area, buf);
    }
}

pub fn button(label: &str, focused: bool) -> Paragraph<'_> {
    Paragraph::new(highlight(label, focused))
        .centered()
        .block(Block::bordered())
}

pub fn visibility_label(visible: bool) -> &'static str {
    if visible {
        "Hide password"
    } else {
        "Show password"
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn field(input: &Input, masked: bool) -> TextField<'_> {
        TextField {
            label: "Password",
            placeholder: "Enter your password",
            input,
            masked,
            focused: true,
        }
    }

    #[rstest]
    #[case::plain(false, 5)]
    #[case::masked(true, 3)]
    fn test_cursor_after_wide_characters(#[case] masked: bool, #[case] column: u16) {
        let input = Input::new("語語".to_string());
        let area = Rect::new(0, 0, 20, 3);
        assert_eq!(field(&input, masked).cursor(area), Position::new(column, 1));
    }

    #[test]
    fn test_masked_cursor_sits_after_last_star() {
        let input = Input::new("pä語".to_string());
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let text_field = field(&input, true);
        let cursor = text_field.cursor(area);
        text_field.render(area, &mut buf);

        assert_eq!(buf[(cursor.x - 1, 1)].symbol(), "*");
        assert_eq!(buf[(cursor.x, 1)].symbol(), " ");
    }

    #[test]
    fn test_masked_field_scrolls_by_characters() {
        let input = Input::new("語".repeat(12));
        let area = Rect::new(0, 0, 10, 3);
        assert_eq!(field(&input, true).cursor(area), Position::new(9, 1));
    }
}
