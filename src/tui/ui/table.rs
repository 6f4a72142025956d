use crate::cards::{Card, Suit};
use crate::hand::MAX_COMMUNITY;
use crate::tui::app::{AppState, SeatView};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(5), // board
            Constraint::Min(6),    // seats
            Constraint::Length(7), // recent events
            Constraint::Length(4), // status bar
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(format!(
        "{}   Pot: {}   Outstanding bid: {}",
        app.street(),
        app.pot(),
        app.outstanding_bid()
    )))
    .block(Block::default().title("holdem-round").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let board_area = chunks[1];
    f.render_widget(
        Block::default().title(format!("Board - {}", app.street())).borders(Borders::ALL),
        board_area,
    );
    let board = app.community().as_slice();
    for (i, slot) in columns(inner(board_area), MAX_COMMUNITY as u16).into_iter().enumerate() {
        render_card_widget(f, slot, board.get(i).copied(), None);
    }

    draw_seats(f, app, chunks[2]);

    let log_lines: Vec<Line> = app.recent_log(5).map(Line::from).collect();
    let log = Paragraph::new(log_lines)
        .block(Block::default().title("Recent").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(log, chunks[3]);

    draw_status(f, app, chunks[4]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    }
}

fn draw_seats(f: &mut Frame, app: &AppState, area: Rect) {
    let seats = app.seats();
    if seats.is_empty() {
        return;
    }
    // Two rows: top left-to-right, bottom right-to-left, roughly a ring.
    let top = seats.len().div_ceil(2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (c, slot) in columns(rows[0], top as u16).into_iter().enumerate() {
        if let Some(seat) = seats.get(c) {
            render_seat(f, slot, app, seat);
        }
    }
    let bottom = seats.len() - top;
    for (c, slot) in columns(rows[1], bottom as u16).into_iter().enumerate() {
        if let Some(seat) = seats.get(seats.len() - 1 - c) {
            render_seat(f, slot, app, seat);
        }
    }
}

fn render_seat(f: &mut Frame, area: Rect, app: &AppState, seat: &SeatView) {
    let is_human = seat.id == app.human;
    let mut title = seat.id.to_string();
    if is_human {
        title.push_str(" [You]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if !seat.in_hand {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if is_human && app.awaiting_input() {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if is_human {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    f.render_widget(block, area);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let lines = vec![
        Line::from(format!("Bid: {}", seat.bid)),
        Line::from(if seat.in_hand { "In hand" } else { "Folded" }),
        match &seat.last_action {
            Some(a) => Line::from(format!("Last: {a}")),
            None => Line::from(vec![Span::raw("Last: "), Span::styled("--", dim)]),
        },
    ];
    let seat_inner = inner(area);
    let hole = if is_human { app.hole() } else { None };
    match hole {
        Some(h) if seat_inner.height > 5 => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(3)])
                .split(seat_inner);
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), split[0]);
            let cards = columns(split[1], 2);
            render_card_widget(f, cards[0], Some(h.first()), Some(Color::Cyan));
            render_card_widget(f, cards[1], Some(h.second()), Some(Color::Cyan));
        }
        Some(h) => {
            let mut lines = lines;
            lines.push(Line::from(format!("Cards: {h}")));
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), seat_inner);
        }
        None => f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), seat_inner),
    }
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(outcome) = app.outcome() {
        lines.push(Line::from(Span::styled(
            outcome.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from("Enter: next hand • Q: quit"));
    } else if let Some(legal) = app.legal_actions() {
        let style = |enabled: bool| {
            if enabled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            }
        };
        lines.push(Line::from(vec![
            Span::raw("Your move: "),
            Span::styled("F fold", style(true)),
            Span::raw(" • "),
            Span::styled("K check", style(legal.check)),
            Span::raw(" • "),
            Span::styled(format!("C call {}", legal.to_call), style(legal.call)),
            Span::raw(" • "),
            Span::styled(format!("R raise (>{})", app.outstanding_bid()), style(true)),
        ]));
    } else {
        lines.push(Line::from("Waiting for other players..."));
    }
    if let Some(msg) = app.message() {
        lines.push(Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Red))));
    }
    let block = Block::default().title("Status • ? help • H history • Q quit").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = app.recent_log(AppState::HISTORY_PAGE_SIZE).map(Line::from).collect();
    if lines.is_empty() {
        lines.push(Line::from("No history yet."));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Close: H",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- F: fold"),
        Line::from("- K: check"),
        Line::from("- C: call"),
        Line::from("- R: raise (opens amount entry)"),
        Line::from("- H: history"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from(Span::styled("Amount Entry:", bold)),
        Line::from("- 0-9: edit amount"),
        Line::from("- Backspace: delete digit"),
        Line::from("- Enter: submit"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ?"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let current = app.amount_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("Raise to: {current}")),
        Line::from(format!("Must be more than {}", app.outstanding_bid())),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("Enter submit, Esc cancel"),
    ];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("Raise Amount").borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = app.message().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);
    let content = match card {
        Some(c) => {
            let (glyph, style) = suit_glyph_and_style(c.suit());
            Line::from(Span::styled(format!("{}{glyph}", c.rank()), style))
        }
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
