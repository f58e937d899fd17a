//! # listening-survey-admin
//!
//! Client-side state behind the administration screens of a listening test:
//!
//! - [`ResponseTable`] - paging and selecting the responses of one test,
//!   deleting the selection and requesting the CSV export
//! - [`TestCatalog`] - searching, duplicating and deleting tests
//! - [`TestEditor`] - editing the items of a test: audios, tags and
//!   per-example questions
//!
//! Storage is reached through the [`ResponseService`] and [`TestService`]
//! traits; nothing here talks to a network.

mod error;
pub use error::AdminError;

mod responses;
pub use responses::{
    CheckState, ExportRequest, ROWS_PER_PAGE_OPTIONS, ResponseRow, ResponseService, ResponseTable,
};

mod editor;
pub use editor::{AudioSlot, TestEditor};

mod catalog;
pub use catalog::{Notice, TestCatalog, TestService, TestSummary};
