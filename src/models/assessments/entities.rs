use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    // 唯一 ID
    pub id: i64,
    // 课程实例内唯一的评估标识
    pub tid: String,
    pub course_id: i64,
    pub course_instance_id: i64,
    // 评估类型（Homework、Exam 等）
    pub assessment_type: String,
    // 显示编号
    pub number: String,
    pub title: String,
    // 原始 options 配置
    pub config: Option<serde_json::Value>,
    pub multiple_instance: bool,
    pub shuffle_questions: bool,
    pub max_score: Option<f64>,
    pub set_name: Option<String>,
    pub text: Option<String>,
    // 软删除时间
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessRule {
    pub id: i64,
    pub assessment_id: i64,
    // 从 1 开始的规则序号
    pub number: i32,
    pub mode: Option<String>,
    pub role: Option<String>,
    pub uids: Option<Vec<String>>,
    // 带时区偏移的 RFC 3339 字符串
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    // 得分百分比
    pub credit: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    pub id: i64,
    pub assessment_id: i64,
    pub number: i32,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentQuestion {
    pub id: i64,
    pub assessment_id: i64,
    pub question_id: i64,
    // 评估内连续编号，跨分区不重置
    pub number: i32,
    // 所属分区编号
    pub zone_number: i32,
    pub max_points: Option<f64>,
    // 每次尝试的分值表
    pub points_list: Option<Vec<f64>>,
    pub init_points: Option<f64>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}
