use crate::calc::DayStatus;
use crate::data::Task;
use crate::ui::app::EditState;
use crate::ui::hit::{HitMap, Target};
use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

const HELP_HEIGHT: u16 = 4;
const PLACEHOLDER: &str = "Add a task…";

/// Everything the day view needs to draw one date's list.
pub struct DayModel<'a> {
    pub date: NaiveDate,
    pub today: NaiveDate,
    pub tasks: &'a [Task],
    pub status: DayStatus,
    /// Row cursor; `tasks.len()` is the new-task row.
    pub cursor: usize,
    pub editing: Option<&'a EditState>,
    pub new_task: &'a str,
    pub show_help: bool,
}

pub fn render(f: &mut Frame, area: Rect, model: &DayModel, hits: &mut HitMap) {
    let help_height = if model.show_help { HELP_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // back + heading
            Constraint::Length(1),
            Constraint::Min(1), // task rows
            Constraint::Length(help_height),
        ])
        .split(area);

    render_header(f, chunks[0], model, hits);
    render_rows(f, chunks[2], model, hits);
    if model.show_help {
        render_help(f, chunks[3], model.editing.is_some());
    }
}

fn render_header(f: &mut Frame, area: Rect, model: &DayModel, hits: &mut HitMap) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            "← Back",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        parts[0],
    );
    hits.push(parts[0], Target::Back);

    let mut spans = vec![Span::styled(
        model.date.format("%A, %B %-d, %Y").to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if model.date == model.today {
        spans.push(Span::styled(" · today", Style::default().fg(Color::Cyan)));
    }
    if !model.tasks.is_empty() {
        let done = model.tasks.iter().filter(|t| t.completed).count();
        let color = match model.status {
            DayStatus::Complete => Color::Green,
            DayStatus::Incomplete => Color::Yellow,
            DayStatus::None => Color::DarkGray,
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{}/{} done ({})", done, model.tasks.len(), model.status.label()),
            Style::default().fg(color),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), parts[1]);
}

/// First row to draw so the cursor row stays on screen.
fn scroll_offset(cursor: usize, visible: usize) -> usize {
    (cursor + 1).saturating_sub(visible)
}

fn render_rows(f: &mut Frame, area: Rect, model: &DayModel, hits: &mut HitMap) {
    let visible = area.height as usize;
    let offset = scroll_offset(model.cursor, visible);
    let total = model.tasks.len() + 1;

    for (line, index) in (offset..total).take(visible).enumerate() {
        let row = Rect::new(area.x, area.y + line as u16, area.width, 1);
        let marker = if index == model.cursor { "› " } else { "  " };
        f.render_widget(
            Paragraph::new(Span::styled(
                marker,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            row,
        );
        match model.tasks.get(index) {
            Some(task) => render_task_row(f, row, task, model, hits),
            None => render_new_task_row(f, row, model, hits),
        }
    }
}

fn row_parts(row: Rect) -> (Rect, Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2), // cursor marker
            Constraint::Length(3), // toggle
            Constraint::Length(1),
            Constraint::Min(0), // text
            Constraint::Length(3), // delete
        ])
        .split(row);
    (parts[1], parts[3], parts[4])
}

fn render_task_row(f: &mut Frame, row: Rect, task: &Task, model: &DayModel, hits: &mut HitMap) {
    let (toggle, text, delete) = row_parts(row);

    let (check, check_style) = if task.completed {
        ("[x]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("[ ]", Style::default())
    };
    f.render_widget(Paragraph::new(Span::styled(check, check_style)), toggle);

    let content = match model.editing.filter(|e| e.id == task.id) {
        Some(edit) if edit.select_all => Line::from(Span::styled(
            edit.buffer.as_str(),
            Style::default().add_modifier(Modifier::REVERSED),
        )),
        Some(edit) => Line::from(vec![
            Span::raw(input_tail(&edit.buffer, text.width)),
            Span::raw("█"),
        ]),
        None if task.completed => Line::from(Span::styled(
            task.text.as_str(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )),
        None => Line::from(task.text.as_str()),
    };
    f.render_widget(Paragraph::new(content), text);

    f.render_widget(
        Paragraph::new(Span::styled(" ✕ ", Style::default().fg(Color::Red))),
        delete,
    );

    hits.push(toggle, Target::Toggle(task.id));
    hits.push(text, Target::Text(task.id));
    hits.push(delete, Target::Delete(task.id));
}

fn render_new_task_row(f: &mut Frame, row: Rect, model: &DayModel, hits: &mut HitMap) {
    let (toggle, text, _) = row_parts(row);
    let focused = model.cursor >= model.tasks.len() && model.editing.is_none();

    f.render_widget(
        Paragraph::new(Span::styled(" + ", Style::default().fg(Color::Cyan))),
        toggle,
    );

    let mut spans = Vec::new();
    if focused {
        spans.push(Span::raw(input_tail(model.new_task, text.width)));
        spans.push(Span::raw("█"));
    } else {
        spans.push(Span::raw(model.new_task));
    }
    if model.new_task.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), text);

    hits.push(row, Target::NewTask);
}

/// The end of `buffer` that fits in `width` columns beside the cursor block,
/// so the typing position is always on screen.
fn input_tail(buffer: &str, width: u16) -> &str {
    let room = usize::from(width.saturating_sub(1));
    let len = buffer.chars().count();
    if len <= room {
        return buffer;
    }
    match buffer.char_indices().nth(len - room) {
        Some((start, _)) => &buffer[start..],
        None => "",
    }
}

fn render_help(f: &mut Frame, area: Rect, editing: bool) {
    let key_rows: Vec<Row> = if editing {
        vec![
            Row::new(vec!["Enter", "Save", "Esc", "Cancel"]),
            Row::new(vec!["↑ ↓", "Save and move", "Ctrl+C", "Quit"]),
        ]
    } else {
        vec![
            Row::new(vec!["↑ ↓", "Move", "Space", "Toggle done"]),
            Row::new(vec!["Enter / e", "Edit / add", "d / Del", "Delete"]),
            Row::new(vec!["Esc / b", "Back", "Ctrl+C", "Quit"]),
        ]
    };
    let help_table = Table::new(
        key_rows,
        [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Length(16),
        ],
    )
    .block(Block::default().borders(Borders::TOP))
    .column_spacing(1);
    f.render_widget(help_table, area);
}
