//! Resume extraction pipeline: prompt building, the completion call, and
//! JSON recovery from the raw model reply.

pub mod fields;
pub mod handlers;
pub mod parser;
pub mod prompt;
