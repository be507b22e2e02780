use crate::features::expenses::form::{self, FormField};
use crate::features::expenses::{ExpenseId, ExpenseManager};
use crate::shared::api_client::ApiClient;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::TableState;

/// キー入力の対象
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Table,
}

/// キー入力から発生する通信を伴う操作
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Delete(ExpenseId),
    Reload,
}

pub struct App {
    pub manager: ExpenseManager,
    pub focus: Focus,
    pub selected_idx: usize,
    /// 一覧のスクロール位置（描画時に`selected_idx`と同期する）
    pub table_state: TableState,
    pub form_hint: Option<(FormField, &'static str)>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            manager: ExpenseManager::new(),
            focus: Focus::Form(FormField::Title),
            selected_idx: 0,
            table_state: TableState::default(),
            form_hint: None,
            should_quit: false,
        }
    }

    /// キー入力を処理する。通信が必要な場合はそのActionを返す
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Action::None;
        }

        match self.focus {
            Focus::Form(field) => self.handle_key_form(field, key),
            Focus::Table => self.handle_key_table(key),
        }
    }

    fn handle_key_form(&mut self, field: FormField, key: KeyEvent) -> Action {
        use KeyCode::*;

        match key.code {
            Tab | Down => self.focus = next_focus(field),
            BackTab => {
                self.focus = match field.index() {
                    0 => Focus::Table,
                    i => Focus::Form(FormField::ALL[i - 1]),
                }
            }
            Up => {
                let i = field.index().saturating_sub(1);
                self.focus = Focus::Form(FormField::ALL[i]);
            }
            Left => form::cycle_select(self.manager.draft_mut(), field, false),
            Right => form::cycle_select(self.manager.draft_mut(), field, true),
            Enter => {
                if let Some((invalid, issue)) = form::first_invalid_field(self.manager.draft()) {
                    self.form_hint = Some((invalid, issue.message()));
                    self.focus = Focus::Form(invalid);
                    return Action::None;
                }
                self.form_hint = None;
                return Action::Submit;
            }
            Esc => {
                if self.manager.mode().is_editing() {
                    self.manager.cancel_edit();
                    self.form_hint = None;
                    self.focus = Focus::Form(FormField::Title);
                } else {
                    self.focus = Focus::Table;
                }
            }
            Backspace => {
                form::pop_char(self.manager.draft_mut(), field);
                self.clear_hint_for(field);
            }
            Char(c) => {
                if form::push_char(self.manager.draft_mut(), field, c) {
                    self.clear_hint_for(field);
                }
            }
            _ => {}
        }
        Action::None
    }

    fn handle_key_table(&mut self, key: KeyEvent) -> Action {
        use KeyCode::*;

        match key.code {
            Char('q') => self.should_quit = true,
            Tab => self.focus = Focus::Form(FormField::Title),
            BackTab => self.focus = Focus::Form(FormField::PaymentMethod),
            Up | Char('k') => self.selected_idx = self.selected_idx.saturating_sub(1),
            Down | Char('j') => {
                if self.selected_idx + 1 < self.manager.expenses().len() {
                    self.selected_idx += 1;
                }
            }
            Char('e') => {
                if let Some(expense) = self.manager.expenses().get(self.selected_idx).cloned() {
                    self.manager.begin_edit(&expense);
                    self.form_hint = None;
                    self.focus = Focus::Form(FormField::Title);
                }
            }
            Char('d') => {
                if let Some(expense) = self.manager.expenses().get(self.selected_idx) {
                    return Action::Delete(expense.id);
                }
            }
            Char('r') => return Action::Reload,
            Char('x') => self.manager.dismiss_error(),
            _ => {}
        }
        Action::None
    }

    /// 通信を伴う操作を実行する
    ///
    /// 失敗はExpenseManagerがエラーメッセージに変換済みなので、ここでは扱わない
    pub async fn perform(&mut self, action: Action, api_client: &ApiClient) {
        match action {
            Action::None => return,
            Action::Submit => {
                if self.manager.save(api_client).await.is_ok() {
                    self.focus = Focus::Form(FormField::Title);
                }
            }
            Action::Delete(id) => {
                let _ = self.manager.delete(api_client, id).await;
            }
            Action::Reload => {
                let _ = self.manager.load_all(api_client).await;
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.manager.expenses().len();
        if self.selected_idx >= len {
            self.selected_idx = len.saturating_sub(1);
        }
    }

    fn clear_hint_for(&mut self, field: FormField) {
        if matches!(self.form_hint, Some((hinted, _)) if hinted == field) {
            self.form_hint = None;
        }
    }
}

fn next_focus(field: FormField) -> Focus {
    match FormField::ALL.get(field.index() + 1) {
        Some(next) => Focus::Form(*next),
        None => Focus::Table,
    }
}
