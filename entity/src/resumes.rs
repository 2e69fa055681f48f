use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Resume aggregate root. Child collections (personal info, experiences,
/// educations, projects) are exclusively owned and cascade-deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resumes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    /// Free-form markdown body.
    pub content: Option<String>,
    /// Transient UI state, e.g. the cached thumbnail URL.
    pub json: Option<Json>,
    pub ats_score: Option<i32>,
    pub template: String,
    pub accent_color: String,
    pub is_public: bool,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::personal_infos::Entity")]
    PersonalInfo,
    #[sea_orm(has_many = "super::experiences::Entity")]
    Experiences,
    #[sea_orm(has_many = "super::educations::Entity")]
    Educations,
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
}

impl Related<super::personal_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonalInfo.def()
    }
}

impl Related<super::experiences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Experiences.def()
    }
}

impl Related<super::educations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educations.def()
    }
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
