//! 分区存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::entity::zones::{ActiveModel, Column, Entity as Zones};
use crate::errors::{Result, SyncError};
use crate::models::assessments::{entities::Zone, requests::UpsertZoneRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    Set,
};

impl SeaOrmStorage {
    /// 按 (assessment_id, number) 写入分区
    pub async fn upsert_zone_impl(&self, req: UpsertZoneRequest) -> Result<i64> {
        let existing = Zones::find()
            .filter(Column::AssessmentId.eq(req.assessment_id))
            .filter(Column::Number.eq(req.number))
            .one(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询分区失败: {e}")))?;

        let mut model = ActiveModel {
            assessment_id: Set(req.assessment_id),
            number: Set(req.number),
            title: Set(req.title),
            ..Default::default()
        };

        let saved = match existing {
            Some(found) => {
                model.id = Set(found.id);
                model.update(&self.db).await
            }
            None => model.insert(&self.db).await,
        }
        .map_err(|e| SyncError::database_operation(format!("写入分区失败: {e}")))?;

        Ok(saved.id)
    }

    /// 删除评估中编号超出磁盘分区数量的分区
    pub async fn delete_excess_zones_impl(&self, assessment_id: i64, last_number: i32) -> Result<u64> {
        let result = Zones::delete_many()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::Number.gt(last_number))
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("删除多余分区失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 删除父评估不存在或已软删除的分区
    pub async fn delete_unused_zones_impl(&self) -> Result<u64> {
        let live_assessments = Assessments::find()
            .select_only()
            .column(AssessmentColumn::Id)
            .filter(AssessmentColumn::DeletedAt.is_null())
            .into_query();

        let result = Zones::delete_many()
            .filter(Column::AssessmentId.not_in_subquery(live_assessments))
            .exec(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("删除孤立分区失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 列出评估的分区
    pub async fn list_zones_impl(&self, assessment_id: i64) -> Result<Vec<Zone>> {
        let zones = Zones::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::Number)
            .all(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询分区失败: {e}")))?;

        Ok(zones.into_iter().map(|m| m.into_zone()).collect())
    }
}
