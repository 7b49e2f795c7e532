pub mod confirmation;
pub mod filters;
pub mod fixtures;
pub mod transitions;

pub use confirmation::{ConfirmationPage, ConfirmationService};
pub use filters::{ConfirmationFilter, SortField, SortSpec};
pub use transitions::{apply_update, resolve_update, StatusUpdate};
