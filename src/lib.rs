pub mod config;
pub mod dispatch;
pub mod git;
pub mod repolist;
pub mod selector;
pub mod session;
pub mod ui;

use std::result;

pub type Result<T> = result::Result<T, anyhow::Error>;
