//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod automation_rule_repo;
pub mod product_repo;
pub mod region_repo;

pub use automation_rule_repo::AutomationRuleRepo;
pub use product_repo::ProductRepo;
pub use region_repo::RegionRepo;
