// crates/db/src/queries.rs
// CRUD queries for the `logs` and `branches` tables.

pub mod branches;
pub mod logs;
