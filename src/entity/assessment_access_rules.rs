//! 评估访问规则实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_access_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub number: i32,
    pub mode: Option<String>,
    pub role: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub uids: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub credit: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_access_rule(self) -> crate::models::assessments::entities::AccessRule {
        use crate::models::assessments::entities::AccessRule;

        AccessRule {
            id: self.id,
            assessment_id: self.assessment_id,
            number: self.number,
            mode: self.mode,
            role: self.role,
            uids: self.uids.and_then(|raw| serde_json::from_str(&raw).ok()),
            start_date: self.start_date,
            end_date: self.end_date,
            credit: self.credit,
        }
    }
}
