use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::assessments::{
    entities::{AccessRule, Assessment, AssessmentQuestion, Zone},
    requests::{
        UpsertAccessRuleRequest, UpsertAssessmentQuestionRequest, UpsertAssessmentRequest,
        UpsertZoneRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 评估同步方法
    // 按 (course_instance_id, tid) 写入评估，返回代理 ID
    async fn upsert_assessment(&self, req: UpsertAssessmentRequest) -> Result<i64>;
    // 软删除课程实例中不在保留集合内的评估
    async fn soft_delete_unused_assessments(
        &self,
        course_instance_id: i64,
        keep_assessment_ids: &[i64],
    ) -> Result<u64>;
    // 列出课程实例中未删除的评估
    async fn list_assessments(&self, course_instance_id: i64) -> Result<Vec<Assessment>>;
    // 通过 TID 获取评估（包含已软删除的）
    async fn get_assessment_by_tid(
        &self,
        course_instance_id: i64,
        tid: &str,
    ) -> Result<Option<Assessment>>;

    /// 访问规则方法
    // 按 (assessment_id, number) 写入访问规则
    async fn upsert_access_rule(&self, req: UpsertAccessRuleRequest) -> Result<i64>;
    // 删除编号大于 last_number 的访问规则
    async fn delete_excess_access_rules(&self, assessment_id: i64, last_number: i32)
    -> Result<u64>;
    // 删除父评估不存在或已软删除的访问规则
    async fn delete_unused_access_rules(&self) -> Result<u64>;
    // 列出评估的访问规则
    async fn list_access_rules(&self, assessment_id: i64) -> Result<Vec<AccessRule>>;

    /// 分区方法
    // 按 (assessment_id, number) 写入分区
    async fn upsert_zone(&self, req: UpsertZoneRequest) -> Result<i64>;
    // 删除编号大于 last_number 的分区
    async fn delete_excess_zones(&self, assessment_id: i64, last_number: i32) -> Result<u64>;
    // 删除父评估不存在或已软删除的分区
    async fn delete_unused_zones(&self) -> Result<u64>;
    // 列出评估的分区
    async fn list_zones(&self, assessment_id: i64) -> Result<Vec<Zone>>;

    /// 评估题目方法
    // 在课程题库中按 QID 查找题目
    async fn get_question_id_by_qid(&self, course_id: i64, qid: &str) -> Result<Option<i64>>;
    // 按 (assessment_id, number) 写入评估题目
    async fn upsert_assessment_question(&self, req: UpsertAssessmentQuestionRequest)
    -> Result<i64>;
    // 软删除评估中不在保留集合内的题目
    async fn soft_delete_unused_assessment_questions_in_assessment(
        &self,
        assessment_id: i64,
        keep_assessment_question_ids: &[i64],
    ) -> Result<u64>;
    // 软删除课程实例中所属评估不在保留集合内的题目
    async fn soft_delete_unused_assessment_questions(
        &self,
        course_instance_id: i64,
        keep_assessment_ids: &[i64],
    ) -> Result<u64>;
    // 列出评估中未删除的题目
    async fn list_assessment_questions(&self, assessment_id: i64)
    -> Result<Vec<AssessmentQuestion>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
