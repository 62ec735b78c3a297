//! 磁盘配置记录
//!
//! `infoAssessment.json` 反序列化后的结构，字段名与磁盘格式保持一致（camelCase）。

mod assessment;
mod question;

pub use assessment::{DiskAccessRule, DiskAssessment, DiskZone};
pub use question::{QuestionEntry, QuestionRecord};
