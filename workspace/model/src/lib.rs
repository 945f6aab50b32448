//! SeaORM entities backing the notekeeper service.

pub mod entities;
