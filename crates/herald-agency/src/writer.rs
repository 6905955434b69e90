#![forbid(unsafe_code)]

//! Writers produce books and hand them to their agency, if they have one.

use tracing::{info, warn};

use crate::agency::BookAgency;

/// An author who may or may not be represented by an agency.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    agency: Option<BookAgency>,
    books_written: u32,
}

impl Writer {
    /// A writer without representation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer represented by `agency`.
    #[must_use]
    pub fn represented_by(agency: BookAgency) -> Self {
        Self {
            agency: Some(agency),
            books_written: 0,
        }
    }

    /// Sign with `agency`, replacing any previous one.
    pub fn sign_with(&mut self, agency: BookAgency) {
        self.agency = Some(agency);
    }

    /// Write a book and deliver it. Returns whether an agency received it.
    pub fn write_book(&mut self) -> bool {
        self.books_written += 1;
        info!(books_written = self.books_written, "wrote a book");
        match &self.agency {
            Some(agency) => {
                agency.receive_book();
                true
            }
            None => {
                warn!("no agency to deliver the book to");
                false
            }
        }
    }

    #[must_use]
    pub fn books_written(&self) -> u32 {
        self.books_written
    }

    #[must_use]
    pub fn agency(&self) -> Option<&BookAgency> {
        self.agency.as_ref()
    }
}
