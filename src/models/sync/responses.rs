use serde::{Deserialize, Serialize};

/// 一次同步的统计结果
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncReport {
    pub assessments: usize,
    pub access_rules: usize,
    pub zones: usize,
    pub assessment_questions: usize,
    // 全局清理阶段影响的行数
    pub soft_deleted_assessments: u64,
    pub soft_deleted_assessment_questions: u64,
    pub deleted_access_rules: u64,
    pub deleted_zones: u64,
}
