//! 评估存储操作

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::assessments::{ActiveModel, Column};
use crate::entity::prelude::Assessments;
use crate::errors::{Result, SyncError};
use crate::models::assessments::{entities::Assessment, requests::UpsertAssessmentRequest};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按 (course_instance_id, tid) 写入评估，已软删除的记录会被恢复
    pub async fn upsert_assessment_impl(&self, req: UpsertAssessmentRequest) -> Result<i64> {
        let existing = Assessments::find()
            .filter(Column::CourseInstanceId.eq(req.course_instance_id))
            .filter(Column::Tid.eq(req.tid.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询评估失败: {e}")))?;

        let config = req.config.as_ref().map(serde_json::to_string).transpose()?;

        let mut model = ActiveModel {
            tid: Set(req.tid),
            course_id: Set(req.course_id),
            course_instance_id: Set(req.course_instance_id),
            assessment_type: Set(req.assessment_type),
            number: Set(req.number),
            title: Set(req.title),
            config: Set(config),
            multiple_instance: Set(req.multiple_instance),
            shuffle_questions: Set(req.shuffle_questions),
            max_score: Set(req.max_score),
            set_name: Set(req.set_name),
            text: Set(req.text),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = match existing {
            Some(found) => {
                model.id = Set(found.id);
                model.update(&self.db).await
            }
            None => model.insert(&self.db).await,
        }
        .map_err(|e| SyncError::database_operation(format!("写入评估失败: {e}")))?;

        Ok(saved.id)
    }

    /// 软删除课程实例中不在保留集合内的评估
    pub async fn soft_delete_unused_assessments_impl(
        &self,
        course_instance_id: i64,
        keep_assessment_ids: &[i64],
    ) -> Result<u64> {
        let mut update = Assessments::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now_timestamp()))
            .filter(Column::CourseInstanceId.eq(course_instance_id))
            .filter(Column::DeletedAt.is_null());

        if !keep_assessment_ids.is_empty() {
            update = update.filter(Column::Id.is_not_in(keep_assessment_ids.iter().copied()));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("软删除评估失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 列出课程实例中未删除的评估
    pub async fn list_assessments_impl(&self, course_instance_id: i64) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(Column::CourseInstanceId.eq(course_instance_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Tid)
            .all(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询评估列表失败: {e}")))?;

        Ok(assessments
            .into_iter()
            .map(|m| m.into_assessment())
            .collect())
    }

    /// 通过 TID 获取评估
    pub async fn get_assessment_by_tid_impl(
        &self,
        course_instance_id: i64,
        tid: &str,
    ) -> Result<Option<Assessment>> {
        let result = Assessments::find()
            .filter(Column::CourseInstanceId.eq(course_instance_id))
            .filter(Column::Tid.eq(tid))
            .one(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询评估失败: {e}")))?;

        Ok(result.map(|m| m.into_assessment()))
    }
}
