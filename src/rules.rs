#[path = "rules/policy.rs"]
pub mod policy;
