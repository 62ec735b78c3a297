//! 预导入模块，方便使用

pub use super::assessment_access_rules::{
    ActiveModel as AccessRuleActiveModel, Entity as AccessRules, Model as AccessRuleModel,
};
pub use super::assessment_questions::{
    ActiveModel as AssessmentQuestionActiveModel, Entity as AssessmentQuestions,
    Model as AssessmentQuestionModel,
};
pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::zones::{ActiveModel as ZoneActiveModel, Entity as Zones, Model as ZoneModel};
