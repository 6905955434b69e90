#![forbid(unsafe_code)]

//! The book agency: a book counter watched by its staff.
//!
//! Every book a writer hands over bumps the count, and every hired employee
//! hears about the new total. The agency holds its staff weakly; an employee
//! that is dropped without being dismissed simply stops hearing about books.

use std::rc::Rc;

use herald_core::{Listener, Registration, RegistryConfig, Subject};
use tracing::{debug, info};

use crate::employee::{Employee, EmployeeId};

/// Counts received books and notifies hired employees of each new total.
///
/// Cloning yields another handle to the same agency.
#[derive(Debug, Clone)]
pub struct BookAgency {
    books: Subject<u32, EmployeeId>,
}

impl BookAgency {
    /// Open an agency that already has `books` books.
    #[must_use]
    pub fn new(books: u32) -> Self {
        Self::with_config(books, RegistryConfig::default())
    }

    /// Open an agency with an explicit staff registry configuration.
    #[must_use]
    pub fn with_config(books: u32, config: RegistryConfig) -> Self {
        Self {
            books: Subject::with_config(books, config),
        }
    }

    /// Current number of books.
    #[must_use]
    pub fn book_count(&self) -> u32 {
        self.books.current_value()
    }

    /// Accept one book from a writer; every employee hears the new total.
    pub fn receive_book(&self) {
        self.books.update(|n| *n = n.saturating_add(1));
        info!(books = self.book_count(), "book received");
    }

    /// Hire `employee`, registering it under its own id.
    ///
    /// Hiring a second employee with an id already on staff is ignored
    /// under the default configuration.
    pub fn hire<E>(&self, employee: &Rc<E>) -> Registration
    where
        E: Employee + Listener<u32> + 'static,
    {
        let id = employee.employee_id().clone();
        let outcome = self.books.register(employee, id);
        debug!(employee = %employee.employee_id(), ?outcome, "hire");
        outcome
    }

    /// Hire `employee` and brief it on the current total right away.
    pub fn hire_and_brief<E>(&self, employee: &Rc<E>) -> Registration
    where
        E: Employee + Listener<u32> + 'static,
    {
        let id = employee.employee_id().clone();
        let outcome = self.books.register_and_notify(employee, id);
        debug!(employee = %employee.employee_id(), ?outcome, "hire and brief");
        outcome
    }

    /// Let the employee with `id` go. Returns `false` if nobody had that id.
    pub fn dismiss(&self, id: &EmployeeId) -> bool {
        self.books.unregister(id)
    }

    /// Ids of everyone on staff, in hiring order (including employees that
    /// have since been dropped without dismissal).
    #[must_use]
    pub fn staff_ids(&self) -> Vec<EmployeeId> {
        self.books.ids()
    }

    /// The underlying book-count subject, for ad-hoc listeners.
    #[must_use]
    pub fn books(&self) -> &Subject<u32, EmployeeId> {
        &self.books
    }
}
