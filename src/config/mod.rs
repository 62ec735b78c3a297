//! 配置管理
//!
//! 配置来源按优先级依次为：`config.toml`、`config.<APP_ENV>.toml`、
//! `COURSESYNC_*` 环境变量以及若干显式覆盖的环境变量。

mod r#impl;
mod structs;

pub use structs::*;
