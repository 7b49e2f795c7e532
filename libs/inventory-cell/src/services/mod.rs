pub mod analytics;
pub mod fixtures;
pub mod inventory;

pub use analytics::InventoryAnalytics;
pub use inventory::{resolve_params, AnalyticsReport, InventoryService};
