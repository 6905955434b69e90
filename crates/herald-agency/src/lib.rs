#![forbid(unsafe_code)]

//! Scenarios built on the Herald listener registry.
//!
//! - [`agency`]: a book agency whose book count is watched by employees
//!   (grammar checkers, publishers), fed by [`writer::Writer`]s.
//! - [`news`]: a news app that notifies readers about articles on their
//!   favourite topic only.

pub mod agency;
pub mod employee;
pub mod news;
pub mod writer;

pub use agency::BookAgency;
pub use employee::{Employee, EmployeeId, GrammarCheck, GrammarChecker, Publisher};
pub use news::{Headline, NewsApp, NewsReader, NewsTopic, PublishingFlag, ReaderId, TopicReader};
pub use writer::Writer;
