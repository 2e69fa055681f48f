use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// AI-generated cover letter. `status` moves draft -> completed, forward
/// only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cover_letters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub company_name: String,
    pub job_title: String,
    pub job_description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: String,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
