use serde::{Deserialize, Serialize};

use super::QuestionEntry;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiskAssessment {
    #[serde(rename = "type")]
    pub assessment_type: String,
    pub number: String,
    pub title: String,
    #[serde(default)]
    pub set: Option<String>,
    // 按真值判断，兼容 1、"yes" 等写法
    #[serde(default)]
    pub shuffle_questions: Option<serde_json::Value>,
    #[serde(default)]
    pub allow_access: Vec<DiskAccessRule>,
    // 保留原始 JSON，分区结构在同步时按形状推断
    #[serde(default)]
    pub options: Option<serde_json::Value>,
}

/// 访问规则，未出现的字段保持为 None，与空值区分
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiskAccessRule {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub uids: Option<Vec<String>>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub credit: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiskZone {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}
