use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
// Use Popup from tui-widgets to render modals
use tui_widgets::popup::Popup;

use crate::notify::Severity;
use crate::palette::RgbColor;

use super::app::App;
use super::detail::DetailPanel;
use super::form::FormField;

const LIST_HELP: &str = "j/k: nav  a: add  e: edit  q: quit";
const DIALOG_HELP: &str = "Tab: next field  Enter: confirm  Esc: cancel";
const NOTIFICATION_HELP: &str = "Press any key";

pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw_frame(frame, app))?;
    Ok(())
}

fn draw_frame(frame: &mut Frame<'_>, app: &mut App) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(frame, layout[0], app);
    draw_body(frame, layout[1], app);
    draw_footer(frame, layout[2], app);
    draw_add_dialog(frame, size, app);
    draw_notification(frame, size, app);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let text = format!("ADDRESS BOOK ({})", app.book.len());
    frame.render_widget(
        Paragraph::new(Span::styled(text, header_text_style(app))),
        area,
    );
}

fn draw_body(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    draw_list(frame, chunks[0], app);
    draw_detail(frame, chunks[1], &app.detail.panel(), app);
}

fn draw_list(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .book
        .persons()
        .iter()
        .map(|person| ListItem::new(person.read(|p| p.name().to_string())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("CONTACTS")
                .border_style(border_style(app)),
        )
        .highlight_style(selection_style(app));

    let mut state = ListState::default();
    if !app.book.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(frame: &mut Frame<'_>, area: Rect, panel: &DetailPanel, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("DETAILS")
        .border_style(border_style(app));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if let Some(placeholder) = panel.placeholder {
        frame.render_widget(
            Paragraph::new(placeholder).alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // Badge height follows the accent radius; zero hides it
    let badge_height = panel.accent.radius.saturating_mul(2).saturating_sub(1);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(badge_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    if badge_height > 0 {
        let width = (badge_height * 2 + 1).min(layout[0].width);
        let badge_area = Rect::new(layout[0].x, layout[0].y, width, layout[0].height);
        let mut lines = vec![Line::from(""); (badge_height / 2) as usize];
        lines.push(Line::from(panel.accent.initials.clone()));
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(chip_style(panel.accent.color).add_modifier(Modifier::BOLD)),
            badge_area,
        );
    }

    let label_width = panel
        .fields
        .iter()
        .map(|f| f.label.len() + 1)
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = panel
        .fields
        .iter()
        .map(|field| {
            Line::from(vec![
                Span::styled(
                    format!("{:width$} ", format!("{}:", field.label), width = label_width),
                    header_text_style(app),
                ),
                Span::raw(field.value.clone()),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    let mut tag_spans = vec![Span::styled(
        format!("{:width$} ", "Tags:", width = label_width),
        header_text_style(app),
    )];
    for chip in &panel.tags {
        tag_spans.push(Span::styled(format!(" {} ", chip.label), chip_style(chip.color)));
        tag_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(tag_spans));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), layout[2]);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let message = if app.notification.is_some() {
        NOTIFICATION_HELP.to_string()
    } else if app.dialog.is_some() {
        DIALOG_HELP.to_string()
    } else {
        match &app.status {
            Some(status) => format!("{}  |  {}", status, LIST_HELP),
            None => LIST_HELP.to_string(),
        }
    };
    let colors = app.ui_colors();
    let style = Style::default()
        .fg(color(colors.status_fg))
        .bg(color(colors.status_bg));

    let background = Block::default().style(Style::default().bg(color(colors.status_bg)));
    frame.render_widget(background, area);

    frame.render_widget(Paragraph::new(message).style(style), area);
}

fn draw_add_dialog(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    // The notification owns the popup while it is up
    if app.notification.is_some() {
        return;
    }
    let Some(dialog) = app.dialog.as_ref() else {
        return;
    };

    let label_width = FormField::ALL
        .iter()
        .map(|field| field.label().len() + 2)
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| {
            let style = if *field == dialog.focus() {
                selection_style(app)
            } else {
                header_text_style(app)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:width$}", format!("{}: ", field.label()), width = label_width),
                    style,
                ),
                Span::raw(dialog.value(*field).to_string()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(DIALOG_HELP));

    let focus_row = dialog.focus().index() as u16;
    let cursor_col = (label_width + dialog.visual_cursor()) as u16;

    let title_line = Line::from(Span::styled(dialog.title(), header_text_style(app)));
    let popup = Popup::new(Text::from(lines))
        .title(title_line)
        .border_style(border_style(app));

    frame.render_stateful_widget_ref(popup, area, &mut app.modal_popup);

    if let Some(area) = app.modal_popup.area() {
        let inner = Block::default().borders(Borders::ALL).inner(*area);
        let x = inner.x.saturating_add(cursor_col);
        let y = inner.y.saturating_add(focus_row);
        frame.set_cursor_position((x, y));
    }
}

fn draw_notification(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let Some(notification) = app.notification.as_ref() else {
        return;
    };

    let header_style = match notification.severity {
        Severity::Info => header_text_style(app),
        Severity::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };

    let mut lines = vec![
        Line::from(Span::styled(notification.header.clone(), header_style)),
        Line::from(""),
    ];
    lines.extend(notification.body.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(NOTIFICATION_HELP));

    let title_line = Line::from(Span::styled(
        notification.title.clone(),
        header_text_style(app),
    ));
    let popup = Popup::new(Text::from(lines))
        .title(title_line)
        .border_style(border_style(app));

    frame.render_stateful_widget_ref(popup, area, &mut app.modal_popup);
}

fn selection_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default()
        .fg(color(colors.selection_fg))
        .bg(color(colors.selection_bg))
}

fn border_style(app: &App) -> Style {
    Style::default().fg(color(app.ui_colors().border))
}

fn header_text_style(app: &App) -> Style {
    Style::default()
        .fg(color(app.ui_colors().border))
        .add_modifier(Modifier::BOLD)
}

fn chip_style(bg: RgbColor) -> Style {
    let fg = if bg.is_light() { Color::Black } else { Color::White };
    Style::default().fg(fg).bg(color(bg))
}

fn color(rgb: RgbColor) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
