use serde::{Deserialize, Serialize};

/// 分区中的一道题：可以是裸 QID，也可以是带计分方式的记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum QuestionEntry {
    Qid(String),
    Record(QuestionRecord),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[serde(default)]
    pub qid: Option<String>,
    // 同时出现时优先于 qid
    #[serde(default)]
    pub qids: Option<Vec<String>>,
    #[serde(default)]
    pub points: Option<Vec<f64>>,
    #[serde(default)]
    pub init_value: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
}

impl From<&str> for QuestionEntry {
    fn from(qid: &str) -> Self {
        QuestionEntry::Qid(qid.to_string())
    }
}
