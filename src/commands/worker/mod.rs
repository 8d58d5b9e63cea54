pub mod assign;
pub mod create;
pub mod delete;
pub mod merge;
pub mod open;
pub mod status;
