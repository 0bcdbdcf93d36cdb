use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CellView, EndReason, GameSession, Point};
use crate::metrics::RunStats;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &GameSession, stats: &RunStats) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_stats(chunks[0], session, stats);
        frame.render_widget(header, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if session.is_game_over() {
            let game_over = self.render_game_over(game_area, session, stats);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, session);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn cell_span(view: CellView) -> Span<'static> {
        match view {
            CellView::Head => Span::styled(
                "# ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            CellView::Body => Span::styled("o ", Style::default().fg(Color::Green)),
            CellView::Item => Span::styled(
                "@ ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            CellView::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_grid(&self, _area: Rect, session: &GameSession) -> Paragraph<'_> {
        let lines: Vec<Line> = (0..session.height())
            .map(|y| {
                let spans: Vec<Span> = (0..session.width())
                    .map(|x| Self::cell_span(session.cell_view(Point::new(x as i32, y as i32))))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        session: &GameSession,
        stats: &RunStats,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(session.ticks().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_elapsed(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Items: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.items_this_game().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.best_score().to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        session: &GameSession,
        stats: &RunStats,
    ) -> Paragraph<'_> {
        let (title, color) = match session.end_reason() {
            Some(EndReason::BoardFull) => ("BOARD CLEARED", Color::Green),
            Some(EndReason::Wall) => ("GAME OVER - hit the wall", Color::Red),
            Some(EndReason::SelfCollision) => ("GAME OVER - ran into yourself", Color::Red),
            None => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    stats.games_played().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, Snake, TickOutcome};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_board_glyphs() {
        let snake = Snake::new(Point::new(3, 2), Direction::Right, 2);
        let session =
            GameSession::with_layout(GameConfig::new(6, 5), snake, Point::new(5, 4), 0).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(72, 16)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &session, &RunStats::new()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains(". . o # . ."));
        assert!(text.contains(". . . . . @"));
    }

    #[test]
    fn test_renders_game_over_reason() {
        let snake = Snake::new(Point::new(5, 2), Direction::Right, 2);
        let mut session =
            GameSession::with_layout(GameConfig::new(6, 5), snake, Point::new(0, 0), 0).unwrap();
        session.tick().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(72, 16)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &session, &RunStats::new()))
            .unwrap();

        assert!(buffer_text(&terminal).contains("hit the wall"));
    }

    #[test]
    fn test_header_shows_items_eaten() {
        let snake = Snake::new(Point::new(2, 2), Direction::Right, 2);
        let mut session =
            GameSession::with_layout(GameConfig::new(8, 5), snake, Point::new(3, 2), 0).unwrap();
        let mut stats = RunStats::new();
        assert_eq!(session.tick(), Ok(TickOutcome::ItemEaten));
        stats.record_item();
        let mut terminal = Terminal::new(TestBackend::new(72, 16)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &session, &stats))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Items: 1"));
        assert!(text.contains("Score: 10"));
    }
}
