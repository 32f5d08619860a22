use crate::directory::Card;
use crate::ui::app::{App, Focus};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{body_regions, centered_rect_by_size, layout_regions};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_ERROR,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const DETAIL_MIN_WIDTH: u16 = 40;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let (search, list, status) = body_regions(body);

    frame.render_widget(Header::new().widget(app.header_stats()), header);
    draw_search(frame, app, search);
    frame.render_widget(Clear, list);
    draw_cards(frame, app, list);
    frame.render_widget(status_line(app), status);
    frame.render_widget(Footer::new().widget(footer, app.focus()), footer);

    if app.focus() == Focus::Detail {
        if let Some(card) = app.selected_card() {
            draw_detail(frame, card, body);
        }
    }
}

fn draw_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Search;
    let border = if focused { ACCENT } else { GLOBAL_BORDER };
    let title = if app.directory().is_search_pending() {
        " Search … "
    } else {
        " Search "
    };
    let state = app.search_box();
    let content = if state.is_empty() {
        Line::from(Span::styled(
            "name, area or city",
            Style::default().fg(MUTED_TEXT),
        ))
    } else {
        Line::from(Span::styled(
            state.query.clone(),
            Style::default().fg(HEADER_TEXT),
        ))
    };

    let widget = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(widget, area);

    if focused && area.width > 2 && area.height > 2 {
        let column = (state.cursor as u16).min(area.width - 3);
        frame.set_cursor_position((area.x + 1 + column, area.y + 1));
    }
}

fn draw_cards(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    if let Some(error) = app.load_error() {
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                "Could not load retailers",
                Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(error.to_string(), Style::default().fg(STATUS_ERROR))),
        ])
        .wrap(Wrap { trim: false });
        frame.render_widget(banner, area);
        return;
    }
    if app.directory().view().shows_no_results() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No retailers found. Try a different name, area or city.",
            Style::default().fg(MUTED_TEXT),
        )));
        frame.render_widget(empty, area);
        return;
    }

    let cards = app.cards();
    let listing = app.listing();
    let lines: Vec<Line> = listing
        .visible_range(cards.len())
        .flat_map(|index| card_lines(&cards[index], index == listing.selected))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn card_lines(card: &Card, selected: bool) -> Vec<Line<'static>> {
    let name_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD);
    let detail_style = Style::default().fg(MUTED_TEXT);

    let location = match &card.city {
        Some(city) => format!("{} · {}", card.area, city),
        None => card.area.clone(),
    };
    let contacts = if card.contacts.is_empty() {
        "No contact number".to_string()
    } else {
        card.contacts
            .iter()
            .map(|contact| contact.number.as_str())
            .collect::<Vec<_>>()
            .join(" · ")
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:>4}. ", card.number), Style::default().fg(ACCENT)),
            Span::styled(card.name.clone(), name_style),
        ]),
        Line::from(Span::styled(format!("      {location}"), detail_style)),
        Line::from(Span::styled(format!("      ☎ {contacts}"), detail_style)),
    ];
    if selected {
        let highlight = Style::default().bg(ACTIVE_HIGHLIGHT);
        lines = lines.into_iter().map(|line| line.style(highlight)).collect();
    }
    lines.push(Line::from(""));
    lines
}

fn status_line(app: &App) -> Paragraph<'static> {
    let directory = app.directory();
    let shown = directory.view().rendered_count();
    let matching = directory.store().filtered().len();

    let text = if app.load_error().is_some() {
        String::new()
    } else if directory.is_loading() {
        " Loading more retailers…".to_string()
    } else if matching == 0 {
        String::new()
    } else if shown >= matching {
        format!(" All {matching} retailers shown")
    } else {
        format!(" {shown} of {matching} shown, scroll for more")
    };
    Paragraph::new(Line::from(Span::styled(text, Style::default().fg(MUTED_TEXT))))
}

fn detail_lines(card: &Card) -> Vec<Line<'static>> {
    let label = Style::default().fg(MUTED_TEXT);
    let value = Style::default().fg(HEADER_TEXT);
    let field = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:<12}"), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("#{}  {}", card.number, card.name),
            value.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Id", card.id.clone()),
        field("Area", card.area.clone()),
    ];
    if let Some(city) = &card.city {
        lines.push(field("City", city.clone()));
    }
    for contact in &card.contacts {
        lines.push(field("Call", contact.href.clone()));
    }
    lines.push(field("Map", card.map_embed_url.clone()));
    if let Some(directions) = &card.directions_url {
        lines.push(field("Directions", directions.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Esc: Close", label)));
    lines
}

fn draw_detail(frame: &mut Frame<'_>, card: &Card, body: Rect) {
    let lines = detail_lines(card);
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let popup_width = content_width.saturating_add(4).max(DETAIL_MIN_WIDTH);
    let popup_height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect_by_size(body, popup_width, popup_height);

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(" Retailer ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let widget = Paragraph::new(lines).block(popup).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}
