//! Drawing a `PageView`: the row list on the left, the highlighted row's
//! detail lines on the right.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Wrap},
};

use garage_core::{PageView, Row, RowKind};

use crate::theme;

const MENU_WIDTH: u16 = 46;

/// Text of one row as shown in the list.
pub fn row_text(row: &Row, capturing: bool) -> String {
    match &row.kind {
        RowKind::Link { .. } => format!("{}  ›", row.label),
        RowKind::Toggle { value, .. } => {
            format!("[{}] {}", if *value { 'x' } else { ' ' }, row.label)
        }
        RowKind::SourceSelector { selected } => format!("{}  ‹ {} ›", row.label, selected.label()),
        RowKind::TextInput { value, .. } => {
            let cursor = if capturing { "_" } else { "" };
            format!("{}: {value}{cursor}", row.label)
        }
        RowKind::Command(_) | RowKind::Entry { .. } | RowKind::Info => row.label.clone(),
    }
}

fn row_style(row: &Row, capturing: bool) -> Style {
    match &row.kind {
        RowKind::Toggle { value: true, .. } => theme::toggle_on(),
        RowKind::TextInput { .. } if capturing => theme::input_active(),
        RowKind::Info => theme::row_inert(),
        _ => theme::row_normal(),
    }
}

/// Draw `view` into `area`. `capturing` marks the highlighted text box as
/// holding input.
pub fn render(frame: &mut Frame, area: Rect, view: &PageView, highlighted: usize, capturing: bool) {
    let [menu_area, details_area] =
        Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(20)]).areas(area);

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let active = capturing && index == highlighted;
            ListItem::new(Line::from(Span::styled(row_text(row, active), row_style(row, active))))
        })
        .collect();

    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .title(Line::from(Span::styled(format!(" {} ", view.title), theme::title_style())));
    if !view.subtitle.is_empty() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", view.subtitle),
            theme::subtitle_style(),
        )));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::row_selected())
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected((!view.rows.is_empty()).then_some(highlighted));
    frame.render_stateful_widget(list, menu_area, &mut state);

    let details: Vec<Line> = view
        .rows
        .get(highlighted)
        .map(|row| row.details.iter().map(|line| Line::from(line.as_str())).collect())
        .unwrap_or_default();
    let panel = Paragraph::new(details)
        .wrap(Wrap { trim: true })
        .style(theme::row_normal())
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default()),
        );
    frame.render_widget(panel, details_area);
}
