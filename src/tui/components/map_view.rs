//! # MapView Component
//!
//! Main panel. Shows a braille map centred on the current location with
//! distance rings, or a placeholder while there is no fix:
//!
//! ```text
//! current_location? ── yes ──► map + marker + rings
//!        │ no
//!        ├── is_loading     ──► spinner
//!        ├── error_message  ──► error + retry hint
//!        └── otherwise      ──► empty state + retry hint
//! ```
//!
//! Rings are drawn as point polylines in metres, converted per axis, so they
//! stay round regardless of latitude.

use std::f64::consts::TAU;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Paragraph};

use crate::location::Coordinate;
use crate::tui::component::Component;

const METERS_PER_DEGREE: f64 = 111_320.0;
/// Half the visible north-south extent.
const VIEW_RADIUS_METERS: f64 = 3_000.0;
pub const RING_RADII_METERS: [f64; 3] = [500.0, 1_000.0, 2_500.0];
const RING_SEGMENTS: usize = 96;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct MapView<'a> {
    pub location: Option<Coordinate>,
    pub is_loading: bool,
    pub error_message: Option<&'a str>,
    pub listing_count: usize,
    pub spinner_frame: usize,
}

impl Component for MapView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Map ")
            .border_style(Style::default().fg(Color::DarkGray));

        let Some(center) = self.location else {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            self.render_placeholder(frame, inner);
            return;
        };

        let inner = block.inner(area);
        let (x_bounds, y_bounds) = view_bounds(center, inner);
        let label = if self.is_loading {
            format!("{} searching...", spinner(self.spinner_frame))
        } else {
            format!("{} stays within 2.5 km", self.listing_count)
        };

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });
                ctx.layer();

                for radius in RING_RADII_METERS {
                    let ring = ring_points(center, radius);
                    ctx.draw(&Points {
                        coords: &ring,
                        color: Color::Blue,
                    });
                    let label_lat = center.latitude + radius / METERS_PER_DEGREE;
                    ctx.print(
                        center.longitude,
                        label_lat,
                        Span::styled(format_ring(radius), Style::default().fg(Color::Blue)),
                    );
                }
                ctx.layer();

                ctx.print(
                    center.longitude,
                    center.latitude,
                    Span::styled(
                        "◉ you",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                );
                ctx.print(
                    x_bounds[0],
                    y_bounds[0],
                    Span::styled(label.clone(), Style::default().fg(Color::Gray)),
                );
            });

        frame.render_widget(canvas, area);
    }
}

impl MapView<'_> {
    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        if self.is_loading {
            lines.push(Line::from(format!(
                "{} Finding your location...",
                spinner(self.spinner_frame)
            )));
        } else if let Some(error) = self.error_message {
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from("Press r to try again"));
        } else {
            lines.push(Line::from(Span::styled(
                "No stays found nearby",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from("Press r to try again"));
        }

        let height = lines.len() as u16;
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

fn meters_per_degree_longitude(latitude: f64) -> f64 {
    (METERS_PER_DEGREE * latitude.to_radians().cos()).max(1.0)
}

/// Canvas bounds around `center`. Terminal cells are about twice as tall as
/// they are wide, so the east-west extent is scaled by the cell aspect.
pub fn view_bounds(center: Coordinate, area: Rect) -> ([f64; 2], [f64; 2]) {
    let half_height_m = VIEW_RADIUS_METERS;
    let aspect = if area.height == 0 {
        1.0
    } else {
        f64::from(area.width) / (2.0 * f64::from(area.height))
    };
    let half_width_m = half_height_m * aspect;

    let half_lat = half_height_m / METERS_PER_DEGREE;
    let half_lon = half_width_m / meters_per_degree_longitude(center.latitude);
    (
        [center.longitude - half_lon, center.longitude + half_lon],
        [center.latitude - half_lat, center.latitude + half_lat],
    )
}

/// Points on a circle of `radius` metres around `center`, as (lon, lat).
pub fn ring_points(center: Coordinate, radius: f64) -> Vec<(f64, f64)> {
    let lon_scale = meters_per_degree_longitude(center.latitude);
    (0..RING_SEGMENTS)
        .map(|i| {
            let theta = TAU * i as f64 / RING_SEGMENTS as f64;
            (
                center.longitude + radius * theta.cos() / lon_scale,
                center.latitude + radius * theta.sin() / METERS_PER_DEGREE,
            )
        })
        .collect()
}

fn format_ring(radius: f64) -> String {
    if radius >= 1_000.0 {
        format!("{:.1} km", radius / 1_000.0)
    } else {
        format!("{radius:.0} m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(view: &mut MapView) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_ring_points_stay_at_radius() {
        let center = Coordinate::new(37.5, 127.0);
        let lon_scale = meters_per_degree_longitude(center.latitude);
        for (lon, lat) in ring_points(center, 1_000.0) {
            let dx = (lon - center.longitude) * lon_scale;
            let dy = (lat - center.latitude) * METERS_PER_DEGREE;
            let distance = (dx * dx + dy * dy).sqrt();
            assert!((distance - 1_000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_view_bounds_are_centred() {
        let center = Coordinate::new(37.5, 127.0);
        let (x, y) = view_bounds(center, Rect::new(0, 0, 80, 20));
        assert!(((x[0] + x[1]) / 2.0 - center.longitude).abs() < 1e-9);
        assert!(((y[0] + y[1]) / 2.0 - center.latitude).abs() < 1e-9);
        assert!(y[1] - y[0] > 0.05);
    }

    #[test]
    fn test_format_ring() {
        assert_eq!(format_ring(500.0), "500 m");
        assert_eq!(format_ring(2_500.0), "2.5 km");
    }

    #[test]
    fn test_placeholder_shows_error_and_retry() {
        let mut view = MapView {
            location: None,
            is_loading: false,
            error_message: Some("permission required"),
            listing_count: 0,
            spinner_frame: 0,
        };
        let text = render_text(&mut view);
        assert!(text.contains("permission required"));
        assert!(text.contains("Press r to try again"));
    }

    #[test]
    fn test_placeholder_shows_loading() {
        let mut view = MapView {
            location: None,
            is_loading: true,
            error_message: None,
            listing_count: 0,
            spinner_frame: 3,
        };
        let text = render_text(&mut view);
        assert!(text.contains("Finding your location..."));
    }

    #[test]
    fn test_map_shows_marker_and_count() {
        let mut view = MapView {
            location: Some(Coordinate::new(37.5665, 126.978)),
            is_loading: false,
            error_message: None,
            listing_count: 10,
            spinner_frame: 0,
        };
        let text = render_text(&mut view);
        assert!(text.contains("you"));
        assert!(text.contains("10 stays within 2.5 km"));
    }
}
