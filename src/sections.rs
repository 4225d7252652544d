//! Report section selection.

/// Which report sections to produce.
///
/// Sections always print in the order of the fields below, whatever order
/// they were requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sections {
    pub system: bool,
    pub hardware: bool,
    pub task_summary: bool,
    pub task_list: bool,
}

impl Sections {
    /// Every section enabled.
    pub fn all() -> Self {
        Self {
            system: true,
            hardware: true,
            task_summary: true,
            task_list: true,
        }
    }

    /// Returns `true` if no section is selected.
    pub fn is_empty(&self) -> bool {
        !(self.system || self.hardware || self.task_summary || self.task_list)
    }

    /// Falls back to every section when none was selected.
    pub fn or_all(self) -> Self {
        if self.is_empty() { Self::all() } else { self }
    }

    /// Names of the selected sections, for logging.
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.system, "system"),
            (self.hardware, "hardware"),
            (self.task_summary, "task_summary"),
            (self.task_list, "task_list"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}
