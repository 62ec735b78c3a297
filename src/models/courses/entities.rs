use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::disk::DiskAssessment;

/// 课程上下文
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseInfo {
    pub course_id: i64,
}

/// 课程实例及其磁盘上的评估定义（按 TID 排序）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CourseInstance {
    pub course_instance_id: i64,
    pub assessments: BTreeMap<String, DiskAssessment>,
}
