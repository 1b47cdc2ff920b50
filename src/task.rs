#[derive(Debug, Clone)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub priority: String, // "high", "medium", "low" by convention
    pub due_date: String, // YYYY-MM-DD
    pub completed: bool,
}

impl Task {
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}
