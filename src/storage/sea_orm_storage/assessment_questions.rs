//! 评估题目存储操作

use super::{SeaOrmStorage, now_timestamp};
use crate::entity::assessment_questions::{ActiveModel, Column, Entity as AssessmentQuestions};
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::errors::{Result, SyncError};
use crate::models::assessments::{
    entities::AssessmentQuestion, requests::UpsertAssessmentQuestionRequest,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    Set,
};

impl SeaOrmStorage {
    /// 按 (assessment_id, number) 写入评估题目，已软删除的记录会被恢复
    pub async fn upsert_assessment_question_impl(
        &self,
        req: UpsertAssessmentQuestionRequest,
    ) -> Result<i64> {
        let existing = AssessmentQuestions::find()
            .filter(Column::AssessmentId.eq(req.assessment_id))
            .filter(Column::Number.eq(req.number))
            .one(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询评估题目失败: {e}")))?;

        let points_list = req
            .points_list
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut model = ActiveModel {
            assessment_id: Set(req.assessment_id),
            question_id: Set(req.question_id),
            number: Set(req.number),
            zone_number: Set(req.zone_number),
            max_points: Set(req.max_points),
            points_list: Set(points_list),
            init_points: Set(req.init_points),
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
        .map_err(|e| SyncError::database_operation(format!("写入评估题目失败: {e}")))?;

        Ok(saved.id)
    }

    /// 软删除评估中不在保留集合内的题目
    pub async fn soft_delete_unused_assessment_questions_in_assessment_impl(
        &self,
        assessment_id: i64,
        keep_assessment_question_ids: &[i64],
    ) -> Result<u64> {
        let mut update = AssessmentQuestions::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now_timestamp()))
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::DeletedAt.is_null());

        if !keep_assessment_question_ids.is_empty() {
            update =
                update.filter(Column::Id.is_not_in(keep_assessment_question_ids.iter().copied()));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("软删除评估题目失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 软删除课程实例中所属评估不在保留集合内的题目
    pub async fn soft_delete_unused_assessment_questions_impl(
        &self,
        course_instance_id: i64,
        keep_assessment_ids: &[i64],
    ) -> Result<u64> {
        let mut stale_assessments = Assessments::find()
            .select_only()
            .column(AssessmentColumn::Id)
            .filter(AssessmentColumn::CourseInstanceId.eq(course_instance_id));

        if !keep_assessment_ids.is_empty() {
            stale_assessments = stale_assessments
                .filter(AssessmentColumn::Id.is_not_in(keep_assessment_ids.iter().copied()));
        }

        let result = AssessmentQuestions::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now_timestamp()))
            .filter(Column::DeletedAt.is_null())
            .filter(Column::AssessmentId.in_subquery(stale_assessments.into_query()))
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("软删除评估题目失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 列出评估中未删除的题目
    pub async fn list_assessment_questions_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<AssessmentQuestion>> {
        let questions = AssessmentQuestions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Number)
            .all(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询评估题目失败: {e}")))?;

        Ok(questions
            .into_iter()
            .map(|m| m.into_assessment_question())
            .collect())
    }
}
