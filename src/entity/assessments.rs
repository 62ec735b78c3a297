//! 评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tid: String,
    pub course_id: i64,
    pub course_instance_id: i64,
    pub assessment_type: String,
    pub number: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub config: Option<String>,
    pub multiple_instance: bool,
    pub shuffle_questions: bool,
    pub max_score: Option<f64>,
    pub set_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub text: Option<String>,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assessment_access_rules::Entity")]
    AccessRules,
    #[sea_orm(has_many = "super::zones::Entity")]
    Zones,
    #[sea_orm(has_many = "super::assessment_questions::Entity")]
    AssessmentQuestions,
}

impl Related<super::assessment_access_rules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessRules.def()
    }
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zones.def()
    }
}

impl Related<super::assessment_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentQuestions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::Assessment;
        use chrono::{DateTime, Utc};

        Assessment {
            id: self.id,
            tid: self.tid,
            course_id: self.course_id,
            course_instance_id: self.course_instance_id,
            assessment_type: self.assessment_type,
            number: self.number,
            title: self.title,
            config: self
                .config
                .and_then(|raw| serde_json::from_str(&raw).ok()),
            multiple_instance: self.multiple_instance,
            shuffle_questions: self.shuffle_questions,
            max_score: self.max_score,
            set_name: self.set_name,
            text: self.text,
            deleted_at: self
                .deleted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
