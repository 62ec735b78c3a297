//! 题库查询

use super::SeaOrmStorage;
use crate::entity::prelude::Questions;
use crate::entity::questions::Column;
use crate::errors::{Result, SyncError};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 在课程题库中按 QID 查找未删除的题目
    pub async fn get_question_id_by_qid_impl(&self, course_id: i64, qid: &str) -> Result<Option<i64>> {
        let result = Questions::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Qid.eq(qid))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SyncError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.id))
    }
}
