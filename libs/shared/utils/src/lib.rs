pub mod ids;
pub mod pagination;
pub mod query;
pub mod test_utils;

pub use pagination::{paginate, PageMeta, PageRequest};
