//! Small centred card shown while a booking is in flight.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::component::Component;
use crate::tui::components::map_view::spinner;

pub struct BookingOverlay<'a> {
    pub listing_name: Option<&'a str>,
    pub spinner_frame: usize,
}

impl Component for BookingOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [card] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(area);
        let [card] = Layout::horizontal([Constraint::Length(44)])
            .flex(Flex::Center)
            .areas(card);

        let lines = vec![
            Line::from(format!("{} Booking in progress...", spinner(self.spinner_frame)))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(self.listing_name.unwrap_or_default().to_string())
                .style(Style::default().fg(Color::Gray)),
        ];

        frame.render_widget(Clear, card);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::bordered().border_style(Style::default().fg(Color::Yellow)),
            ),
            card,
        );
    }
}
