pub mod csv;
pub mod error;
pub mod model;
pub mod query;
pub mod states;
