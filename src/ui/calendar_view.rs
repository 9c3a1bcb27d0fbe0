use crate::calc::{date_key, month_grid, month_name, DayStatus, WEEKDAY_HEADER};
use crate::data::TaskStore;
use crate::ui::hit::{HitMap, Target};
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

// Calendar cell colors
const INCOMPLETE_COLOR: Color = Color::Yellow;
const COMPLETE_COLOR: Color = Color::Green;

const MONTH_WIDTH: u16 = 20;
const MONTH_HEIGHT: u16 = 8; // title + weekday header + up to 6 weeks
const ROW_HEIGHT: u16 = MONTH_HEIGHT + 1;
const GAP_WIDTH: u16 = 3;
const MAX_COLUMNS: u16 = 4;
const HELP_HEIGHT: u16 = 5;

/// Everything the year calendar needs to draw itself.
pub struct CalendarModel<'a> {
    pub year: i32,
    pub focus: NaiveDate,
    pub today: NaiveDate,
    pub store: &'a TaskStore,
    pub show_help: bool,
}

pub fn render(f: &mut Frame, area: Rect, model: &CalendarModel, hits: &mut HitMap) {
    let grid = MonthGrid::fit(area, model);
    let (legend_height, help_height) = if grid.compact {
        (1, 0)
    } else {
        (2, if model.show_help { HELP_HEIGHT } else { 0 })
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // year navigation
            Constraint::Length(legend_height),
            Constraint::Min(0), // months
            Constraint::Length(help_height),
        ])
        .split(area);

    let grid = grid.scrolled_to(chunks[2], model);
    render_nav(f, chunks[0], model, hits);
    render_legend(f, chunks[1], &grid);
    render_months(f, chunks[2], model, &grid, hits);
    if help_height > 0 {
        render_help(f, chunks[3]);
    }
}

/// How the twelve month blocks are laid out in the space available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonthGrid {
    columns: u16,
    rows: u16,
    first_row: u16,
    visible_rows: u16,
    /// Legend padding and help are dropped to make room for months.
    compact: bool,
}

impl MonthGrid {
    fn fit(area: Rect, model: &CalendarModel) -> Self {
        let columns = ((area.width + GAP_WIDTH) / (MONTH_WIDTH + GAP_WIDTH)).clamp(1, MAX_COLUMNS);
        let rows = 12u16.div_ceil(columns);
        let help_height = if model.show_help { HELP_HEIGHT } else { 0 };
        let needed = 1 + 2 + rows * ROW_HEIGHT - 1 + help_height;
        MonthGrid {
            columns,
            rows,
            first_row: 0,
            visible_rows: rows,
            compact: area.height < needed,
        }
    }

    /// Picks the window of month rows drawn in `area`, keeping the row that
    /// holds the focus on screen.
    fn scrolled_to(self, area: Rect, model: &CalendarModel) -> Self {
        let visible_rows = ((area.height + 1) / ROW_HEIGHT).clamp(1, self.rows);
        let focus_row = if model.focus.year() == model.year {
            model.focus.month0() as u16 / self.columns
        } else {
            0
        };
        MonthGrid {
            first_row: focus_row.saturating_sub(visible_rows - 1),
            visible_rows,
            ..self
        }
    }

    fn hidden_above(&self) -> bool {
        self.first_row > 0
    }

    fn hidden_below(&self) -> bool {
        self.first_row + self.visible_rows < self.rows
    }
}

fn render_nav(f: &mut Frame, area: Rect, model: &CalendarModel, hits: &mut HitMap) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    let button = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    f.render_widget(Paragraph::new(Span::styled(" ◀ ", button)), parts[0]);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{:^6}", model.year),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        parts[1],
    );
    f.render_widget(Paragraph::new(Span::styled(" ▶ ", button)), parts[2]);
    f.render_widget(Paragraph::new(Span::styled("[ Today ]", button)), parts[4]);

    hits.push(parts[0], Target::PrevYear);
    hits.push(parts[2], Target::NextYear);
    hits.push(parts[4], Target::ThisYear);
}

fn render_legend(f: &mut Frame, area: Rect, grid: &MonthGrid) {
    let mut spans = vec![
        Span::raw(" "),
        Span::styled("■", Style::default().fg(INCOMPLETE_COLOR)),
        Span::raw(" open  "),
        Span::styled("■", Style::default().fg(COMPLETE_COLOR)),
        Span::raw(" done  "),
        Span::styled(
            "dd",
            Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
        ),
        Span::raw(" today"),
    ];
    let more = match (grid.hidden_above(), grid.hidden_below()) {
        (true, true) => Some("▲▼"),
        (true, false) => Some("▲"),
        (false, true) => Some("▼"),
        (false, false) => None,
    };
    if let Some(arrows) = more {
        spans.push(Span::styled(
            format!("   {arrows} more months"),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_months(
    f: &mut Frame,
    area: Rect,
    model: &CalendarModel,
    grid: &MonthGrid,
    hits: &mut HitMap,
) {
    for month in 1..=12u32 {
        let index = (month - 1) as u16;
        let row = index / grid.columns;
        if row < grid.first_row || row >= grid.first_row + grid.visible_rows {
            continue;
        }
        let x = area.x + (index % grid.columns) * (MONTH_WIDTH + GAP_WIDTH);
        let y = area.y + (row - grid.first_row) * ROW_HEIGHT;
        let rect = Rect::new(x, y, MONTH_WIDTH, MONTH_HEIGHT).intersection(area);
        if rect.is_empty() {
            continue;
        }
        render_month(f, rect, model, month, hits);
    }
}

fn render_month(
    f: &mut Frame,
    area: Rect,
    model: &CalendarModel,
    month: u32,
    hits: &mut HitMap,
) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("{:^20}", month_name(month)),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            WEEKDAY_HEADER,
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let cells = month_grid(model.year, month);
    for (week, days) in cells.chunks(7).enumerate() {
        let mut spans = Vec::new();
        for (col, cell) in days.iter().copied().enumerate() {
            if col > 0 {
                spans.push(Span::raw(" "));
            }
            let Some(date) = cell.and_then(|day| NaiveDate::from_ymd_opt(model.year, month, day))
            else {
                spans.push(Span::raw("  "));
                continue;
            };

            let status = model.store.status(&date_key(date));
            let style = calendar_day_style(status, date == model.focus, date == model.today);
            spans.push(Span::styled(format!("{:2}", date.day()), style));

            let cell_rect = Rect::new(area.x + col as u16 * 3, area.y + 2 + week as u16, 2, 1);
            hits.push(cell_rect.intersection(area), Target::Day(date));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let key_rows: Vec<Row> = vec![
        Row::new(vec!["← → ↑ ↓", "Move day", "Enter", "Open day"]),
        Row::new(vec!["p / [", "Previous year", "n / ]", "Next year"]),
        Row::new(vec!["t", "This year", "click", "Open day / button"]),
        Row::new(vec!["q/Ctrl+C", "Quit", "", ""]),
    ];
    let help_table = Table::new(
        key_rows,
        [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Length(20),
        ],
    )
    .block(Block::default().borders(Borders::TOP))
    .column_spacing(1);
    f.render_widget(help_table, area);
}

/// Determines the ratatui `Style` for a calendar day cell.
pub(crate) fn calendar_day_style(status: DayStatus, is_focus: bool, is_today: bool) -> Style {
    let mut style = if is_focus {
        let bg = match status {
            DayStatus::None => Color::White,
            DayStatus::Incomplete => INCOMPLETE_COLOR,
            DayStatus::Complete => COMPLETE_COLOR,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        match status {
            DayStatus::None => Style::default(),
            DayStatus::Incomplete => Style::default().fg(INCOMPLETE_COLOR),
            DayStatus::Complete => Style::default()
                .fg(COMPLETE_COLOR)
                .add_modifier(Modifier::BOLD),
        }
    };
    if is_today {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }
    style
}
