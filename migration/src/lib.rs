pub use sea_orm_migration::prelude::*;

mod m20250110_000001_create_user_credits;
mod m20250110_000002_create_resume_tables;
mod m20250115_000001_create_artifact_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_user_credits::Migration),
            Box::new(m20250110_000002_create_resume_tables::Migration),
            Box::new(m20250115_000001_create_artifact_tables::Migration),
        ]
    }
}
