use serde::{Deserialize, Serialize};

/// 按 (course_instance_id, tid) 写入评估
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsertAssessmentRequest {
    pub tid: String,
    pub course_id: i64,
    pub course_instance_id: i64,
    pub assessment_type: String,
    pub number: String,
    pub title: String,
    pub config: Option<serde_json::Value>,
    pub multiple_instance: bool,
    pub shuffle_questions: bool,
    pub max_score: Option<f64>,
    pub set_name: Option<String>,
    pub text: Option<String>,
}

/// 按 (assessment_id, number) 写入访问规则
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsertAccessRuleRequest {
    pub assessment_id: i64,
    pub number: i32,
    pub mode: Option<String>,
    pub role: Option<String>,
    pub uids: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub credit: Option<i32>,
}

/// 按 (assessment_id, number) 写入分区
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsertZoneRequest {
    pub assessment_id: i64,
    pub number: i32,
    pub title: Option<String>,
}

/// 按 (assessment_id, number) 写入评估题目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsertAssessmentQuestionRequest {
    pub assessment_id: i64,
    pub question_id: i64,
    pub number: i32,
    pub zone_number: i32,
    pub max_points: Option<f64>,
    pub points_list: Option<Vec<f64>>,
    pub init_points: Option<f64>,
}
