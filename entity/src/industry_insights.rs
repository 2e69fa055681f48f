use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cached industry dashboard data, one row per (user, industry).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "industry_insights")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub industry: String,
    #[sea_orm(column_type = "Double")]
    pub growth_rate: f64,
    pub demand_level: String,
    pub market_outlook: String,
    pub top_skills: Json,
    pub key_trends: Json,
    pub salary_ranges: Json,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
