pub mod assign;
pub mod common;
pub mod create;
pub mod delete;
pub mod merge;
pub mod open;
pub mod reply;
pub mod reply_main;
pub mod role;
pub mod status;
pub mod worker;
