use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quiz / mock-interview result. `questions` keeps the full question set
/// with the user's answers as provider-shaped JSON.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    #[sea_orm(column_type = "Double")]
    pub quiz_score: f64,
    pub questions: Json,
    pub improvement_tip: Option<String>,
    pub created_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
