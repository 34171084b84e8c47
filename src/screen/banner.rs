use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::prelude::{Line, Style, Stylize, Widget};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_big_text::{BigText, PixelSize};

/// Promotional pane shown on the left of both screens.
pub struct BannerWidget;

impl Widget for BannerWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::from(" ♫ soundgate ").centered())
            .border_type(BorderType::Rounded)
            .border_style(Style::new().dark_gray());
        let inner = block.inner(area);
        block.render(area, buf);

        let [_, headline, _, big, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(inner);
        Paragraph::new(Line::from("Listen to the top music").bold())
            .centered()
            .render(headline, buf);
        BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::new().light_green())
            .lines(vec!["FOR FREE".into()])
            .alignment(Alignment::Center)
            .build()
            .render(big, buf);
    }
}
