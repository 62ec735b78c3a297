//! 评估同步
//!
//! 将磁盘上的评估配置逐级写入数据库：评估 → 访问规则 → 分区 → 评估题目，
//! 每一级写入完成后清理数据库中多余的记录。整个过程严格顺序执行，遇到第一个错误即终止，
//! 已写入的数据不会回滚。

pub mod access_rules;
pub mod assessments;
pub mod questions;
pub mod zone_list;
pub mod zones;

use chrono_tz::Tz;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::entities::{CourseInfo, CourseInstance};
use crate::models::disk::{DiskAccessRule, DiskZone};
use crate::models::sync::responses::SyncReport;
use crate::storage::Storage;

pub use questions::{PlannedQuestion, plan_assessment_questions};
pub use zone_list::{ZoneList, ZoneSource, derive_zone_list};

pub struct AssessmentReconciler {
    storage: Arc<dyn Storage>,
    timezone: Tz,
}

impl AssessmentReconciler {
    pub fn new(storage: Arc<dyn Storage>, timezone: Tz) -> Self {
        Self { storage, timezone }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub(crate) fn timezone(&self) -> Tz {
        self.timezone
    }

    /// 同步课程实例下的全部评估，并清理磁盘上已不存在的记录
    pub async fn sync(
        &self,
        course: &CourseInfo,
        course_instance: &CourseInstance,
    ) -> Result<SyncReport> {
        assessments::sync(self, course, course_instance).await
    }

    /// 同步单个评估的访问规则，返回写入的规则数
    pub async fn sync_access_rules(
        &self,
        assessment_id: i64,
        rules: &[DiskAccessRule],
    ) -> Result<usize> {
        access_rules::sync_access_rules(self, assessment_id, rules).await
    }

    /// 同步单个评估的分区，返回写入的分区数
    pub async fn sync_zones(&self, assessment_id: i64, zones: &[DiskZone]) -> Result<usize> {
        zones::sync_zones(self, assessment_id, zones).await
    }

    /// 同步单个评估的题目，返回写入的评估题目数
    pub async fn sync_assessment_questions(
        &self,
        assessment_id: i64,
        zones: &[DiskZone],
        course: &CourseInfo,
    ) -> Result<usize> {
        questions::sync_assessment_questions(self, assessment_id, zones, course).await
    }
}

/// 从 0 开始的下标转为从 1 开始的编号
pub(crate) fn position(index: usize) -> i32 {
    (index + 1) as i32
}
