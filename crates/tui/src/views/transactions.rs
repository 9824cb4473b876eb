use api_types::transaction::{SOURCE_WEB, Transaction, TransactionInput, TransactionType};

use crate::client::{Client, Session, TransactionFilters};

use super::{ViewStatus, clamp_index, next_index, parse_amount, require};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    Amount,
    Type,
    Category,
    Description,
}

impl TransactionField {
    fn next(self) -> Self {
        match self {
            Self::Amount => Self::Type,
            Self::Type => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Amount,
        }
    }
}

/// Create/edit form. Values are only read on submit.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub amount: String,
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    pub focus: TransactionField,
    pub error: Option<String>,
}

impl TransactionForm {
    pub fn blank() -> Self {
        Self {
            amount: String::new(),
            kind: TransactionType::Income,
            category: String::new(),
            description: String::new(),
            focus: TransactionField::Amount,
            error: None,
        }
    }

    pub fn for_transaction(tx: &Transaction) -> Self {
        Self {
            amount: tx.amount.to_string(),
            kind: tx.kind,
            category: tx.category.clone(),
            description: tx.description.clone(),
            ..Self::blank()
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// On the type field, `i`/`e` pick a type and space toggles it.
    pub fn input(&mut self, ch: char) {
        match self.focus {
            TransactionField::Amount => self.amount.push(ch),
            TransactionField::Type => match ch {
                'i' | 'I' => self.kind = TransactionType::Income,
                'e' | 'E' => self.kind = TransactionType::Expense,
                ' ' => self.kind = self.kind.toggle(),
                _ => {}
            },
            TransactionField::Category => self.category.push(ch),
            TransactionField::Description => self.description.push(ch),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            TransactionField::Amount => {
                self.amount.pop();
            }
            TransactionField::Type => {}
            TransactionField::Category => {
                self.category.pop();
            }
            TransactionField::Description => {
                self.description.pop();
            }
        }
    }

    /// Every field is required; client records are tagged with the `web` source.
    pub fn to_input(&self) -> Result<TransactionInput, String> {
        Ok(TransactionInput {
            amount: parse_amount(&self.amount)?,
            kind: self.kind,
            category: require("Category", &self.category)?,
            description: require("Description", &self.description)?,
            source: SOURCE_WEB.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    StartDate,
    EndDate,
    Type,
    Category,
    Source,
}

impl FilterField {
    fn next(self) -> Self {
        match self {
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::Type,
            Self::Type => Self::Category,
            Self::Category => Self::Source,
            Self::Source => Self::StartDate,
        }
    }
}

/// Draft filters; applied (and re-fetched) on submit.
#[derive(Debug, Clone)]
pub struct FilterEditor {
    pub draft: TransactionFilters,
    pub focus: FilterField,
}

impl FilterEditor {
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// On the type field space cycles all → income → expense.
    pub fn input(&mut self, ch: char) {
        match self.focus {
            FilterField::StartDate => self.draft.start_date.push(ch),
            FilterField::EndDate => self.draft.end_date.push(ch),
            FilterField::Type => {
                if ch == ' ' {
                    self.draft.kind = match self.draft.kind {
                        None => Some(TransactionType::Income),
                        Some(TransactionType::Income) => Some(TransactionType::Expense),
                        Some(TransactionType::Expense) => None,
                    };
                }
            }
            FilterField::Category => self.draft.category.push(ch),
            FilterField::Source => self.draft.source.push(ch),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FilterField::StartDate => {
                self.draft.start_date.pop();
            }
            FilterField::EndDate => {
                self.draft.end_date.pop();
            }
            FilterField::Type => self.draft.kind = None,
            FilterField::Category => {
                self.draft.category.pop();
            }
            FilterField::Source => {
                self.draft.source.pop();
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct TransactionsView {
    pub status: ViewStatus,
    pub items: Vec<Transaction>,
    pub selected: usize,
    pub filters: TransactionFilters,
    pub filter_editor: Option<FilterEditor>,
    pub form: Option<TransactionForm>,
    pub editing: Option<Transaction>,
    pub pending_delete: Option<Transaction>,
}

impl TransactionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch(&mut self, client: &Client, session: &Session) {
        self.status = ViewStatus::Loading;
        match client.transactions(session, &self.filters).await {
            Ok(items) => {
                self.selected = clamp_index(self.selected, items.len());
                self.items = items;
                self.status = ViewStatus::Ready;
            }
            Err(err) => self.status = ViewStatus::failed(&err),
        }
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected = next_index(self.selected, self.items.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = Some(TransactionForm::blank());
    }

    pub fn open_edit(&mut self) {
        if let Some(tx) = self.selected_transaction().cloned() {
            self.form = Some(TransactionForm::for_transaction(&tx));
            self.editing = Some(tx);
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.editing = None;
    }

    /// Updates the record being edited, or creates a new one, then reloads.
    /// A rejected request leaves the form open with the server message.
    pub async fn submit(&mut self, client: &Client, session: &Session) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let input = match form.to_input() {
            Ok(input) => input,
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };
        form.error = None;

        let result = match &self.editing {
            Some(tx) => client.update_transaction(session, &tx.id, &input).await,
            None => client.create_transaction(session, &input).await,
        };

        match result {
            Ok(()) => {
                self.fetch(client, session).await;
                self.close_form();
            }
            Err(err) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(err.to_string());
                }
            }
        }
    }

    /// Nothing is sent until [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_transaction().cloned();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self, client: &Client, session: &Session) {
        let Some(tx) = self.pending_delete.take() else {
            return;
        };
        match client.delete_transaction(session, &tx.id).await {
            Ok(()) => self.fetch(client, session).await,
            Err(err) => self.status = ViewStatus::failed(&err),
        }
    }

    pub fn open_filters(&mut self) {
        self.filter_editor = Some(FilterEditor {
            draft: self.filters.clone(),
            focus: FilterField::StartDate,
        });
    }

    pub fn cancel_filters(&mut self) {
        self.filter_editor = None;
    }

    pub async fn apply_filters(&mut self, client: &Client, session: &Session) {
        let Some(editor) = self.filter_editor.take() else {
            return;
        };
        self.filters = editor.draft;
        self.fetch(client, session).await;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: "t1".to_string(),
            amount: 25000.0,
            kind: TransactionType::Expense,
            category: "food".to_string(),
            description: "lunch".to_string(),
            source: "telegram".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn edit_form_starts_from_the_record() {
        let form = TransactionForm::for_transaction(&sample());
        assert_eq!(form.amount, "25000");
        assert_eq!(form.kind, TransactionType::Expense);
        assert_eq!(form.category, "food");
        assert_eq!(form.description, "lunch");
    }

    #[test]
    fn submitted_records_use_web_source() {
        let input = TransactionForm::for_transaction(&sample()).to_input().unwrap();
        assert_eq!(input.source, SOURCE_WEB);
    }

    #[test]
    fn missing_fields_block_submission() {
        let mut form = TransactionForm::blank();
        form.amount = "100".to_string();
        assert_eq!(form.to_input().unwrap_err(), "Category is required");
        form.category = "salary".to_string();
        assert_eq!(form.to_input().unwrap_err(), "Description is required");
    }

    #[test]
    fn type_field_keys() {
        let mut form = TransactionForm::blank();
        form.focus = TransactionField::Type;
        form.input('e');
        assert_eq!(form.kind, TransactionType::Expense);
        form.input(' ');
        assert_eq!(form.kind, TransactionType::Income);
        form.input('x');
        assert_eq!(form.kind, TransactionType::Income);
        assert!(form.amount.is_empty());
    }

    #[test]
    fn filter_type_cycles_through_all() {
        let mut editor = FilterEditor {
            draft: TransactionFilters::default(),
            focus: FilterField::Type,
        };
        editor.input(' ');
        assert_eq!(editor.draft.kind, Some(TransactionType::Income));
        editor.input(' ');
        assert_eq!(editor.draft.kind, Some(TransactionType::Expense));
        editor.input(' ');
        assert_eq!(editor.draft.kind, None);
    }

    #[test]
    fn delete_needs_a_selection() {
        let mut view = TransactionsView::new();
        view.request_delete();
        assert!(view.pending_delete.is_none());

        view.items.push(sample());
        view.request_delete();
        assert_eq!(view.pending_delete.as_ref().map(|tx| tx.id.as_str()), Some("t1"));
        view.cancel_delete();
        assert!(view.pending_delete.is_none());
    }
}
