use crate::error::{AppError, Result, ValidationError};
use crate::store::TaskStore;
use crate::task::Task;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the displayed task table.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: i64,
    pub description: String,
    pub priority: String,
    pub due_date: String,
    pub status: &'static str,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            description: task.description.clone(),
            priority: task.priority.clone(),
            due_date: task.due_date.clone(),
            status: task.status_label(),
        }
    }
}

/// The three input fields of the add-task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Priority,
    DueDate,
}

/// Mediates between raw user input and the store. Owns the displayed
/// rows, the form field contents, and the selection; the UI only
/// renders this state and forwards key presses.
pub struct Controller {
    store: TaskStore,
    pub rows: Vec<TaskRow>,
    pub description_input: String,
    pub priority_input: String,
    pub due_date_input: String,
    pub selected: Option<usize>,
}

impl Controller {
    pub fn new(store: TaskStore) -> Result<Self> {
        let mut controller = Self {
            store,
            rows: Vec::new(),
            description_input: String::new(),
            priority_input: String::new(),
            due_date_input: String::new(),
            selected: None,
        };
        controller.refresh_list()?;
        Ok(controller)
    }

    pub fn input_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Description => &mut self.description_input,
            Field::Priority => &mut self.priority_input,
            Field::DueDate => &mut self.due_date_input,
        }
    }

    /// Validate the form, persist the task, clear the form, refresh.
    /// On a validation failure nothing is mutated and the field
    /// contents are kept so the user can correct them.
    pub fn add_task(&mut self) -> Result<()> {
        let description = self.description_input.trim().to_string();
        let priority = self.priority_input.trim().to_string();
        let due_date = self.due_date_input.trim().to_string();

        if description.is_empty() || priority.is_empty() || due_date.is_empty() {
            return Err(ValidationError::MissingField.into());
        }
        // Calendar-aware strict parse: "2024-13-40" and "2024-02-30"
        // are both rejected.
        if NaiveDate::parse_from_str(&due_date, DATE_FORMAT).is_err() {
            return Err(ValidationError::BadDateFormat.into());
        }

        self.store.create(&description, &priority, &due_date)?;

        self.description_input.clear();
        self.priority_input.clear();
        self.due_date_input.clear();

        self.refresh_list()
    }

    /// Discard the displayed rows and rebuild them wholesale from the
    /// store. The only mechanism that updates the view after a
    /// mutation, apart from the single-row drop in `remove_selected`.
    pub fn refresh_list(&mut self) -> Result<()> {
        let tasks = self.store.list_all()?;
        self.rows = tasks.iter().map(TaskRow::from_task).collect();
        self.selected = if self.rows.is_empty() {
            None
        } else {
            Some(self.selected.unwrap_or(0).min(self.rows.len() - 1))
        };
        Ok(())
    }

    /// Delete the selected task and drop just its row from the display.
    pub fn remove_selected(&mut self) -> Result<()> {
        let index = self.selected.ok_or(AppError::NoSelection)?;
        let id = self.rows[index].id;
        self.store.delete_by_id(id)?;
        self.rows.remove(index);
        self.selected = if self.rows.is_empty() {
            None
        } else {
            Some(index.min(self.rows.len() - 1))
        };
        Ok(())
    }

    /// Mark the selected task completed, then refresh the whole list.
    pub fn mark_selected_completed(&mut self) -> Result<()> {
        let index = self.selected.ok_or(AppError::NoSelection)?;
        let id = self.rows[index].id;
        self.store.mark_completed(id)?;
        self.refresh_list()
    }

    pub fn select_previous(&mut self) {
        if let Some(index) = self.selected {
            if index > 0 {
                self.selected = Some(index - 1);
            }
        }
    }

    pub fn select_next(&mut self) {
        if let Some(index) = self.selected {
            if index + 1 < self.rows.len() {
                self.selected = Some(index + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> Controller {
        Controller::new(TaskStore::open_in_memory().unwrap()).unwrap()
    }

    fn fill(c: &mut Controller, description: &str, priority: &str, due_date: &str) {
        c.description_input = description.to_string();
        c.priority_input = priority.to_string();
        c.due_date_input = due_date.to_string();
    }

    #[test]
    fn add_task_round_trips_through_the_store() {
        let mut c = controller();
        fill(&mut c, "Buy milk", "high", "2024-06-01");
        c.add_task().unwrap();

        assert_eq!(c.rows.len(), 1);
        let row = &c.rows[0];
        assert_eq!(row.id, 1);
        assert_eq!(row.description, "Buy milk");
        assert_eq!(row.priority, "high");
        assert_eq!(row.due_date, "2024-06-01");
        assert_eq!(row.status, "Pending");
    }

    #[test]
    fn add_task_clears_the_form_on_success() {
        let mut c = controller();
        fill(&mut c, "walk the dog", "low", "2024-03-05");
        c.add_task().unwrap();

        assert!(c.description_input.is_empty());
        assert!(c.priority_input.is_empty());
        assert!(c.due_date_input.is_empty());
    }

    #[test]
    fn empty_fields_are_rejected_without_mutation() {
        let mut c = controller();
        for (description, priority, due_date) in [
            ("", "high", "2024-06-01"),
            ("task", "", "2024-06-01"),
            ("task", "high", ""),
            ("   ", "high", "2024-06-01"),
        ] {
            fill(&mut c, description, priority, due_date);
            match c.add_task() {
                Err(AppError::Validation(ValidationError::MissingField)) => {}
                other => panic!("expected MissingField, got {other:?}"),
            }
            assert!(c.rows.is_empty());
        }
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let mut c = controller();
        for due_date in ["2024-13-40", "2024-02-30", "06/01/2024", "2024-6-1x"] {
            fill(&mut c, "task", "high", due_date);
            match c.add_task() {
                Err(AppError::Validation(ValidationError::BadDateFormat)) => {}
                other => panic!("expected BadDateFormat for {due_date:?}, got {other:?}"),
            }
            assert!(c.rows.is_empty());
        }
    }

    #[test]
    fn validation_failure_preserves_the_entered_input() {
        let mut c = controller();
        fill(&mut c, "task", "high", "not-a-date");
        assert!(c.add_task().is_err());

        assert_eq!(c.description_input, "task");
        assert_eq!(c.priority_input, "high");
        assert_eq!(c.due_date_input, "not-a-date");
    }

    #[test]
    fn row_actions_without_selection_report_no_selection() {
        let mut c = controller();
        assert!(matches!(c.remove_selected(), Err(AppError::NoSelection)));
        assert!(matches!(
            c.mark_selected_completed(),
            Err(AppError::NoSelection)
        ));
    }

    #[test]
    fn remove_selected_drops_exactly_that_row() {
        let mut c = controller();
        fill(&mut c, "first", "low", "2024-01-01");
        c.add_task().unwrap();
        fill(&mut c, "second", "low", "2024-01-02");
        c.add_task().unwrap();

        c.selected = Some(0);
        c.remove_selected().unwrap();

        assert_eq!(c.rows.len(), 1);
        assert_eq!(c.rows[0].description, "second");
        // The store agrees with the display.
        c.refresh_list().unwrap();
        assert_eq!(c.rows.len(), 1);
        assert_eq!(c.rows[0].description, "second");
    }

    #[test]
    fn remove_selected_tolerates_externally_deleted_rows() {
        let mut c = controller();
        fill(&mut c, "gone", "low", "2024-01-01");
        c.add_task().unwrap();

        // Deleted behind the controller's back; the stale row's id no
        // longer exists in the store.
        c.store.delete_by_id(c.rows[0].id).unwrap();
        c.remove_selected().unwrap();
        assert!(c.rows.is_empty());
    }

    #[test]
    fn mark_selected_completed_flips_only_the_status() {
        let mut c = controller();
        fill(&mut c, "task", "medium", "2024-04-04");
        c.add_task().unwrap();

        c.mark_selected_completed().unwrap();
        let row = &c.rows[0];
        assert_eq!(row.status, "Completed");
        assert_eq!(row.description, "task");
        assert_eq!(row.priority, "medium");
        assert_eq!(row.due_date, "2024-04-04");

        // Completing twice is safe.
        c.mark_selected_completed().unwrap();
        assert_eq!(c.rows[0].status, "Completed");
    }

    #[test]
    fn end_to_end_add_complete_remove() {
        let mut c = controller();
        fill(&mut c, "Buy milk", "high", "2024-06-01");
        c.add_task().unwrap();

        assert_eq!(c.rows.len(), 1);
        assert_eq!(c.rows[0].id, 1);
        assert_eq!(c.rows[0].status, "Pending");

        c.mark_selected_completed().unwrap();
        assert_eq!(c.rows[0].status, "Completed");

        c.remove_selected().unwrap();
        assert!(c.rows.is_empty());
        assert_eq!(c.selected, None);
    }
}
