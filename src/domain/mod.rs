// Domain layer - Dashboard records, tag grammar and drill-through configuration
pub mod dashboard;
pub mod drill_through;
pub mod error;
pub mod tag;
