use std::io::stdout;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tui_widgets::popup::PopupState;

use crate::book::AddressBook;
use crate::bus::EventBus;
use crate::config::{Config, UiColors};
use crate::notify::{Notification, TerminalAction};
use crate::submit::Intent;

use super::detail::{DetailView, SelectionChanged};
use super::draw;
use super::form::PersonDialog;

pub struct App<'a> {
    config: &'a Config,
    pub book: AddressBook,
    selections: Rc<EventBus<SelectionChanged>>,
    pub detail: DetailView,
    pub selected: usize,
    pub dialog: Option<PersonDialog>,
    pub notification: Option<Notification>,
    pub modal_popup: PopupState,
    pub status: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(book: AddressBook, config: &'a Config) -> Self {
        let selections = Rc::new(EventBus::new());
        let detail = DetailView::new(Rc::clone(&selections), config.phone_region.clone());
        let mut app = Self {
            config,
            book,
            selections,
            detail,
            selected: 0,
            dialog: None,
            notification: None,
            modal_popup: PopupState::default(),
            status: None,
        };
        app.publish_selection();
        app.detail.pump();
        app
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: ratatui::backend::Backend,
    {
        loop {
            self.detail.pump();
            draw::render(terminal, self)?;

            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
        self.detail.free_resources();
        Ok(())
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return true;
        }

        if self.notification.is_some() {
            self.dismiss_notification();
            return false;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.select(0),
            KeyCode::Char('G') | KeyCode::End => {
                self.select(self.book.len().saturating_sub(1))
            }
            KeyCode::Char('a') => self.open_dialog(PersonDialog::new()),
            KeyCode::Char('e') => {
                if let Some(cell) = self.book.get(self.selected) {
                    let dialog = PersonDialog::editing(cell.id(), &cell.snapshot());
                    self.open_dialog(dialog);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.dialog = None;
                self.set_status("Cancelled");
            }
            KeyCode::Tab | KeyCode::Down => dialog.focus_next(),
            KeyCode::BackTab | KeyCode::Up => dialog.focus_prev(),
            KeyCode::Enter => self.confirm_dialog(),
            _ => {
                dialog.handle_key_event(key);
            }
        }
    }

    fn confirm_dialog(&mut self) {
        let Some(dialog) = self.dialog.as_ref() else {
            return;
        };

        let intent = dialog.intent();
        let report = dialog.confirm(&mut self.book);
        if report.notification.action == TerminalAction::Close {
            self.dialog = None;
            // An edited person stays selected; the detail pane reads it live
            if report.added().is_some() && intent == Intent::Add {
                self.set_status(format!("{} contact(s)", self.book.len()));
                self.select(self.book.len().saturating_sub(1));
            }
        }
        self.notification = Some(report.notification);
        self.modal_popup = PopupState::default();
    }

    fn open_dialog(&mut self, dialog: PersonDialog) {
        self.dialog = Some(dialog);
        self.modal_popup = PopupState::default();
    }

    fn dismiss_notification(&mut self) {
        self.notification = None;
        self.modal_popup = PopupState::default();
    }

    fn move_selection(&mut self, delta: isize) {
        if self.book.is_empty() {
            return;
        }
        let len = self.book.len() as isize;
        let next = (self.selected as isize + delta).clamp(0, len - 1) as usize;
        self.select(next);
    }

    fn select(&mut self, index: usize) {
        if self.book.is_empty() {
            return;
        }
        if index != self.selected || self.detail.current().is_none() {
            self.selected = index;
            self.publish_selection();
        }
    }

    fn publish_selection(&self) {
        let event = match self.book.get(self.selected) {
            Some(person) => SelectionChanged::to(Rc::clone(person)),
            None => SelectionChanged::cleared(),
        };
        self.selections.publish(event);
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
    }

    pub fn ui_colors(&self) -> &UiColors {
        &self.config.ui.colors
    }
}
