//! 访问规则存储操作

use super::SeaOrmStorage;
use crate::entity::assessment_access_rules::{ActiveModel, Column, Entity as AccessRules};
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::errors::{Result, SyncError};
use crate::models::assessments::{entities::AccessRule, requests::UpsertAccessRuleRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    Set,
};

impl SeaOrmStorage {
    /// 按 (assessment_id, number) 写入访问规则
    pub async fn upsert_access_rule_impl(&self, req: UpsertAccessRuleRequest) -> Result<i64> {
        let existing = AccessRules::find()
            .filter(Column::AssessmentId.eq(req.assessment_id))
            .filter(Column::Number.eq(req.number))
            .one(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询访问规则失败: {e}")))?;

        let uids = req.uids.as_ref().map(serde_json::to_string).transpose()?;

        let mut model = ActiveModel {
            assessment_id: Set(req.assessment_id),
            number: Set(req.number),
            mode: Set(req.mode),
            role: Set(req.role),
            uids: Set(uids),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            credit: Set(req.credit),
            ..Default::default()
        };

        let saved = match existing {
            Some(found) => {
                model.id = Set(found.id);
                model.update(&self.db).await
            }
            None => model.insert(&self.db).await,
        }
        .map_err(|e| SyncError::database_operation(format!("写入访问规则失败: {e}")))?;

        Ok(saved.id)
    }

    /// 删除评估中编号超出磁盘规则数量的访问规则
    pub async fn delete_excess_access_rules_impl(
        &self,
        assessment_id: i64,
        last_number: i32,
    ) -> Result<u64> {
        let result = AccessRules::delete_many()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::Number.gt(last_number))
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("删除多余访问规则失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 删除父评估不存在或已软删除的访问规则
    pub async fn delete_unused_access_rules_impl(&self) -> Result<u64> {
        let live_assessments = Assessments::find()
            .select_only()
            .column(AssessmentColumn::Id)
            .filter(AssessmentColumn::DeletedAt.is_null())
            .into_query();

        let result = AccessRules::delete_many()
            .filter(Column::AssessmentId.not_in_subquery(live_assessments))
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("删除孤立访问规则失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 列出评估的访问规则
    pub async fn list_access_rules_impl(&self, assessment_id: i64) -> Result<Vec<AccessRule>> {
        let rules = AccessRules::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::Number)
            .all(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询访问规则失败: {e}")))?;

        Ok(rules.into_iter().map(|m| m.into_access_rule()).collect())
    }
}
