//! Application services.

pub mod fanout;
