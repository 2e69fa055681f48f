pub mod assessments;
pub mod cover_letters;
pub mod educations;
pub mod experiences;
pub mod industry_insights;
pub mod personal_infos;
pub mod projects;
pub mod resumes;
pub mod user_credits;

pub mod prelude {
    pub use super::assessments::Entity as Assessments;
    pub use super::cover_letters::Entity as CoverLetters;
    pub use super::educations::Entity as Educations;
    pub use super::experiences::Entity as Experiences;
    pub use super::industry_insights::Entity as IndustryInsights;
    pub use super::personal_infos::Entity as PersonalInfos;
    pub use super::projects::Entity as Projects;
    pub use super::resumes::Entity as Resumes;
    pub use super::user_credits::Entity as UserCredits;
}
