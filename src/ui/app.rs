use crate::calc::{add_months, date_key};
use crate::data::{AppSettings, Task, TaskStore};
use crate::ui::calendar_view::{self, CalendarModel};
use crate::ui::day_view::{self, DayModel};
use crate::ui::hit::{HitMap, Target};
use crate::ui::Tui;
use anyhow::Result;
use chrono::{Datelike, Duration, Local, NaiveDate};
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Frame;
use std::time::Duration as StdDuration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum View {
    Calendar,
    #[default]
    Day,
}

/// In-progress edit of one task's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditState {
    pub id: i64,
    pub buffer: String,
    /// Whole buffer selected: the next typed character replaces it.
    pub select_all: bool,
}

/// Inconsistent state found (and repaired) by [`App::self_check`].
#[derive(Debug, Error, PartialEq)]
pub enum StateIssue {
    #[error("editing task {0} which is not in the current list")]
    StaleEdit(i64),
    #[error("edit left open outside the day view")]
    EditOutsideDayView,
    #[error("row cursor {cursor} past the new-task row ({len} tasks)")]
    CursorOutOfRange { cursor: usize, len: usize },
    #[error("calendar focus {focus} outside displayed year {year}")]
    FocusOutsideYear { focus: NaiveDate, year: i32 },
}

/// Single owner of all application state. Views only read it through
/// borrowed models; every change goes through a named transition below.
pub struct App {
    store: TaskStore,
    view: View,
    /// Year shown by the calendar.
    year: i32,
    /// Date whose tasks the day view shows.
    selected_date: NaiveDate,
    /// Keyboard cursor in the calendar.
    focus: NaiveDate,
    today: NaiveDate,
    /// Day view row; `tasks.len()` is the trailing new-task row.
    cursor: usize,
    editing: Option<EditState>,
    new_task: String,
    pub settings: AppSettings,
    hits: HitMap,
}

impl App {
    pub fn new(settings: AppSettings, today: NaiveDate, start_date: NaiveDate) -> Self {
        App {
            store: TaskStore::default(),
            view: View::Day,
            year: start_date.year(),
            selected_date: start_date,
            focus: start_date,
            today,
            cursor: 0,
            editing: None,
            new_task: String::new(),
            settings,
            hits: HitMap::default(),
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    fn selected_key(&self) -> String {
        date_key(self.selected_date)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks(&date_key(self.selected_date))
    }

    fn on_new_task_row(&self) -> bool {
        self.cursor >= self.tasks().len()
    }

    fn task_at_cursor(&self) -> Option<i64> {
        self.tasks().get(self.cursor).map(|t| t.id)
    }

    // ── View transitions ──────────────────────────────────────────────────────

    pub fn select_date(&mut self, date: NaiveDate) {
        debug!(date = %date, "select date");
        self.selected_date = date;
        self.focus = date;
        self.year = date.year();
        self.editing = None;
        self.new_task.clear();
        self.cursor = 0;
        self.view = View::Day;
    }

    /// Leaves the day view. Never changes stored tasks: an open edit is
    /// dropped and the new-task buffer discarded.
    pub fn back(&mut self) {
        debug!(date = %self.selected_date, "back to calendar");
        self.editing = None;
        self.new_task.clear();
        self.focus = self.selected_date;
        self.year = self.selected_date.year();
        self.view = View::Calendar;
    }

    pub fn prev_year(&mut self) {
        self.shift_year(-1);
    }

    pub fn next_year(&mut self) {
        self.shift_year(1);
    }

    pub fn this_year(&mut self) {
        self.year = self.today.year();
        self.focus = self.today;
    }

    fn shift_year(&mut self, delta: i32) {
        let focus = add_months(self.focus, 12 * delta);
        if focus.year() != self.focus.year() + delta {
            // out of chrono's representable range
            return;
        }
        self.year += delta;
        self.focus = focus;
    }

    pub fn move_focus(&mut self, days: i64) {
        if let Some(focus) = self.focus.checked_add_signed(Duration::days(days)) {
            self.focus = focus;
            self.year = focus.year();
        }
    }

    // ── Task transitions ──────────────────────────────────────────────────────

    pub fn toggle(&mut self, id: i64) {
        let key = self.selected_key();
        self.store.toggle(&key, id);
    }

    pub fn delete(&mut self, id: i64) {
        let key = self.selected_key();
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        self.store.delete(&key, id);
        self.cursor = self.cursor.min(self.tasks().len());
    }

    pub fn start_edit(&mut self, id: i64) {
        let Some(index) = self.tasks().iter().position(|t| t.id == id) else {
            return;
        };
        let buffer = self.tasks()[index].text.clone();
        self.cursor = index;
        self.editing = Some(EditState {
            id,
            buffer,
            select_all: true,
        });
    }

    /// Ends edit mode, saving the buffer. A blank buffer keeps the old text.
    pub fn commit_edit(&mut self) {
        if let Some(edit) = self.editing.take() {
            let key = self.selected_key();
            self.store.rename(&key, edit.id, &edit.buffer);
        }
    }

    /// Ends edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn submit_new_task(&mut self) {
        let key = self.selected_key();
        let text = std::mem::take(&mut self.new_task);
        if let Some(id) = self.store.add(&key, &text) {
            debug!(id, date = %key, "task added");
        }
        self.cursor = self.tasks().len();
    }

    /// Focus is leaving whatever input is active: commit the edit or submit
    /// the pending new task.
    fn blur(&mut self) {
        if self.editing.is_some() {
            self.commit_edit();
        } else if self.on_new_task_row() && !self.new_task.is_empty() {
            self.submit_new_task();
        }
    }

    // ── Input handling ────────────────────────────────────────────────────────

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.view {
            View::Calendar => self.handle_calendar_key(code),
            View::Day => {
                self.handle_day_key(code);
                false
            }
        }
    }

    fn handle_calendar_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left => self.move_focus(-1),
            KeyCode::Right => self.move_focus(1),
            KeyCode::Up => self.move_focus(-7),
            KeyCode::Down => self.move_focus(7),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_date(self.focus),
            KeyCode::Char('p') | KeyCode::Char('[') => self.prev_year(),
            KeyCode::Char('n') | KeyCode::Char(']') => self.next_year(),
            KeyCode::Char('t') => self.this_year(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    fn handle_day_key(&mut self, code: KeyCode) {
        if let Some(edit) = self.editing.as_mut() {
            match code {
                KeyCode::Enter => self.commit_edit(),
                KeyCode::Esc => self.cancel_edit(),
                KeyCode::Up | KeyCode::Down => {
                    self.commit_edit();
                    self.move_cursor(code);
                }
                KeyCode::Backspace => {
                    if edit.select_all {
                        edit.buffer.clear();
                        edit.select_all = false;
                    } else {
                        edit.buffer.pop();
                    }
                }
                KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
                    edit.select_all = false;
                }
                KeyCode::Char(c) => {
                    if edit.select_all {
                        edit.buffer.clear();
                        edit.select_all = false;
                    }
                    edit.buffer.push(c);
                }
                _ => {}
            }
            return;
        }

        if self.on_new_task_row() {
            match code {
                KeyCode::Enter => self.submit_new_task(),
                KeyCode::Esc => {
                    if self.new_task.is_empty() {
                        self.back();
                    } else {
                        self.new_task.clear();
                    }
                }
                KeyCode::Up => {
                    self.blur();
                    self.move_cursor(code);
                }
                KeyCode::Backspace => {
                    self.new_task.pop();
                }
                KeyCode::Char(c) => self.new_task.push(c),
                _ => {}
            }
            return;
        }

        let Some(id) = self.task_at_cursor() else {
            return;
        };
        match code {
            KeyCode::Up | KeyCode::Down => self.move_cursor(code),
            KeyCode::Char(' ') => self.toggle(id),
            KeyCode::Enter | KeyCode::Char('e') => self.start_edit(id),
            KeyCode::Char('d') | KeyCode::Delete => self.delete(id),
            KeyCode::Esc | KeyCode::Char('b') => self.back(),
            _ => {}
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(self.tasks().len()),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.handle_click(mouse.column, mouse.row);
        }
    }

    /// Activates whatever the last render drew at this cell.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        let Some(target) = self.hits.target_at(column, row) else {
            return;
        };
        debug!(?target, column, row, "click");
        match target {
            Target::Day(date) => self.select_date(date),
            Target::PrevYear => self.prev_year(),
            Target::NextYear => self.next_year(),
            Target::ThisYear => self.this_year(),
            Target::Back => {
                self.blur();
                self.back();
            }
            Target::Toggle(id) => {
                self.blur();
                self.toggle(id);
                self.focus_task(id);
            }
            Target::Text(id) => {
                if self.editing.as_ref().is_some_and(|e| e.id == id) {
                    return;
                }
                self.blur();
                self.start_edit(id);
            }
            Target::Delete(id) => {
                self.blur();
                self.delete(id);
            }
            Target::NewTask => {
                if self.editing.is_some() {
                    self.commit_edit();
                }
                self.cursor = self.tasks().len();
            }
        }
    }

    fn focus_task(&mut self, id: i64) {
        if let Some(index) = self.tasks().iter().position(|t| t.id == id) {
            self.cursor = index;
        }
    }

    // ── Self-check ────────────────────────────────────────────────────────────

    /// Detects and repairs inconsistent state. Each issue is logged as a
    /// warning; the UI keeps running.
    pub fn self_check(&mut self) -> Vec<StateIssue> {
        let mut issues = Vec::new();

        if self.editing.is_some() && self.view != View::Day {
            issues.push(StateIssue::EditOutsideDayView);
            self.editing = None;
        }
        if let Some(id) = self.editing.as_ref().map(|e| e.id) {
            if !self.tasks().iter().any(|t| t.id == id) {
                issues.push(StateIssue::StaleEdit(id));
                self.editing = None;
            }
        }
        let len = self.tasks().len();
        if self.cursor > len {
            issues.push(StateIssue::CursorOutOfRange {
                cursor: self.cursor,
                len,
            });
            self.cursor = len;
        }
        if self.focus.year() != self.year {
            issues.push(StateIssue::FocusOutsideYear {
                focus: self.focus,
                year: self.year,
            });
            let moved = add_months(self.focus, 12 * (self.year - self.focus.year()));
            if moved.year() == self.year {
                self.focus = moved;
            } else {
                self.year = self.focus.year();
            }
        }

        for issue in &issues {
            warn!(%issue, "repaired inconsistent state");
        }
        issues
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.hits.clear();
        match self.view {
            View::Calendar => {
                let model = CalendarModel {
                    year: self.year,
                    focus: self.focus,
                    today: self.today,
                    store: &self.store,
                    show_help: self.settings.show_help,
                };
                calendar_view::render(f, area, &model, &mut self.hits);
            }
            View::Day => {
                let key = date_key(self.selected_date);
                let tasks = self.store.tasks(&key);
                let model = DayModel {
                    date: self.selected_date,
                    today: self.today,
                    tasks,
                    status: self.store.status(&key),
                    cursor: self.cursor,
                    editing: self.editing.as_ref(),
                    new_task: &self.new_task,
                    show_help: self.settings.show_help,
                };
                day_view::render(f, area, &model, &mut self.hits);
            }
        }
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let poll = StdDuration::from_millis(app.settings.poll_interval_ms.max(1));
    loop {
        app.set_today(Local::now().date_naive());
        terminal.draw(|f| app.render(f))?;
        if event::poll(poll)? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
            app.self_check();
        }
    }
    Ok(())
}
