#![forbid(unsafe_code)]

//! Agency staff: the listeners watching the book count.

use std::borrow::Borrow;
use std::cell::{Cell, RefCell};
use std::fmt;

use herald_core::Listener;
use tracing::{debug, info};

/// Registration id of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeId(String);

impl EmployeeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EmployeeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for EmployeeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Anything the agency can hire: it has a stable id.
pub trait Employee {
    fn employee_id(&self) -> &EmployeeId;
}

/// Outcome of a grammar check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarCheck {
    Correct,
    ContainsErrors,
}

/// Proofreads the catalogue every time the book count changes.
#[derive(Debug)]
pub struct GrammarChecker {
    id: EmployeeId,
    checks_run: Cell<u32>,
    last_result: Cell<Option<GrammarCheck>>,
}

impl GrammarChecker {
    #[must_use]
    pub fn new(id: impl Into<EmployeeId>) -> Self {
        Self {
            id: id.into(),
            checks_run: Cell::new(0),
            last_result: Cell::new(None),
        }
    }

    /// Run one check. The catalogue is always clean.
    pub fn check_grammar(&self) -> GrammarCheck {
        self.checks_run.set(self.checks_run.get() + 1);
        let result = GrammarCheck::Correct;
        self.last_result.set(Some(result));
        result
    }

    #[must_use]
    pub fn checks_run(&self) -> u32 {
        self.checks_run.get()
    }

    #[must_use]
    pub fn last_result(&self) -> Option<GrammarCheck> {
        self.last_result.get()
    }
}

impl Employee for GrammarChecker {
    fn employee_id(&self) -> &EmployeeId {
        &self.id
    }
}

impl Listener<u32> for GrammarChecker {
    fn on_value_changed(&self, books: &u32) {
        let result = self.check_grammar();
        debug!(employee = %self.id, books, ?result, "grammar checked");
    }
}

/// Announces each newly published book.
#[derive(Debug)]
pub struct Publisher {
    id: EmployeeId,
    announcements: RefCell<Vec<String>>,
    last_published: Cell<Option<u32>>,
}

impl Publisher {
    #[must_use]
    pub fn new(id: impl Into<EmployeeId>) -> Self {
        Self {
            id: id.into(),
            announcements: RefCell::new(Vec::new()),
            last_published: Cell::new(None),
        }
    }

    /// Publish and return the announcement text.
    pub fn publish(&self, books: u32) -> String {
        let line =
            format!("Published a new book. Now we have a total of {books} books published");
        info!(employee = %self.id, books, "book published");
        self.announcements.borrow_mut().push(line.clone());
        self.last_published.set(Some(books));
        line
    }

    /// Every announcement made so far, oldest first.
    #[must_use]
    pub fn announcements(&self) -> Vec<String> {
        self.announcements.borrow().clone()
    }

    #[must_use]
    pub fn last_published(&self) -> Option<u32> {
        self.last_published.get()
    }
}

impl Employee for Publisher {
    fn employee_id(&self) -> &EmployeeId {
        &self.id
    }
}

impl Listener<u32> for Publisher {
    fn on_value_changed(&self, books: &u32) {
        self.publish(*books);
    }
}
