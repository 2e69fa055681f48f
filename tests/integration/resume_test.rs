use crate::setup_test_db;
use careerforge::error::ApiError;
use careerforge::models::resume::{
    EducationPayload, ExperiencePayload, PersonalInfoPayload, ProjectPayload, ResumeCreateRequest,
    ResumeUpdateRequest,
};
use careerforge::services::ResumeService;
use uuid::Uuid;

fn experience(title: &str) -> ExperiencePayload {
    ExperiencePayload {
        title: title.to_string(),
        company: Some("Acme".to_string()),
        location: None,
        start_date: Some("2020-01".to_string()),
        end_date: None,
        description: Some("Shipped things".to_string()),
    }
}

fn education(school: &str) -> EducationPayload {
    EducationPayload {
        school: school.to_string(),
        degree: Some("BSc".to_string()),
        field_of_study: Some("CS".to_string()),
        start_date: None,
        end_date: None,
        description: None,
    }
}

fn create_request() -> ResumeCreateRequest {
    ResumeCreateRequest {
        title: "Backend Engineer".to_string(),
        content: None,
        template: None,
        accent_color: None,
        personal_info: Some(PersonalInfoPayload {
            full_name: Some("Jordan Doe".to_string()),
            headline: Some("Backend Engineer".to_string()),
            email: Some("jordan@example.com".to_string()),
            phone: None,
            location: None,
            website: None,
            summary: None,
        }),
        experiences: Some(vec![experience("Engineer"), experience("Senior Engineer")]),
        educations: Some(vec![education("State University")]),
        projects: Some(vec![ProjectPayload {
            name: "careerforge".to_string(),
            description: None,
            url: None,
        }]),
    }
}

fn empty_update() -> ResumeUpdateRequest {
    ResumeUpdateRequest {
        title: None,
        content: None,
        ats_score: None,
        template: None,
        accent_color: None,
        personal_info: None,
        experiences: None,
        educations: None,
        projects: None,
    }
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_create_returns_id_and_persists_children() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    let aggregate = service.get(id, owner_id).await.unwrap();
    assert_eq!(aggregate.resume.title, "Backend Engineer");
    assert!(aggregate.personal_info.is_some());
    assert_eq!(aggregate.experiences.len(), 2);
    assert_eq!(aggregate.educations.len(), 1);
    assert_eq!(aggregate.projects.len(), 1);

    // Children come back in payload order
    assert_eq!(aggregate.experiences[0].title, "Engineer");
    assert_eq!(aggregate.experiences[1].title, "Senior Engineer");
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_update_replaces_collection_wholesale() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    // Replace 2 experiences with 3 new ones; leave everything else alone
    let mut update = empty_update();
    update.experiences = Some(vec![
        experience("Staff Engineer"),
        experience("Principal Engineer"),
        experience("Consultant"),
    ]);
    service.update(id, owner_id, update).await.unwrap();

    let aggregate = service.get(id, owner_id).await.unwrap();
    assert_eq!(aggregate.experiences.len(), 3);
    assert_eq!(aggregate.experiences[0].title, "Staff Engineer");
    // Untouched collections survive
    assert_eq!(aggregate.educations.len(), 1);
    assert_eq!(aggregate.projects.len(), 1);
    assert!(aggregate.personal_info.is_some());
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_update_with_empty_list_clears_collection() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    let mut update = empty_update();
    update.experiences = Some(vec![]);
    service.update(id, owner_id, update).await.unwrap();

    let aggregate = service.get(id, owner_id).await.unwrap();
    assert!(aggregate.experiences.is_empty());
    // Omitted collections remain intact
    assert_eq!(aggregate.educations.len(), 1);
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_update_scalars_only() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    let mut update = empty_update();
    update.title = Some("Platform Engineer".to_string());
    update.ats_score = Some(87);
    service.update(id, owner_id, update).await.unwrap();

    let aggregate = service.get(id, owner_id).await.unwrap();
    assert_eq!(aggregate.resume.title, "Platform Engineer");
    assert_eq!(aggregate.resume.ats_score, Some(87));
    assert_eq!(aggregate.experiences.len(), 2);
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_create_rolls_back_whole_aggregate_on_child_failure() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let mut request = create_request();
    // Projects are the last child collection inserted; a name beyond the
    // column's 255-char bound makes that insert fail after the root and the
    // other children have already been written inside the transaction
    request.projects = Some(vec![ProjectPayload {
        name: "x".repeat(300),
        description: None,
        url: None,
    }]);

    let result = service.create(owner_id, request).await;
    assert!(matches!(result, Err(ApiError::Database(_))));

    // No root row means no orphaned children either
    let resumes = service.list(owner_id).await.unwrap();
    assert!(resumes.is_empty());
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_non_owner_cannot_touch_resume() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let stranger_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    let get_result = service.get(id, stranger_id).await;
    assert!(matches!(get_result, Err(ApiError::NotFound(_))));

    let update_result = service.update(id, stranger_id, empty_update()).await;
    assert!(matches!(update_result, Err(ApiError::NotFound(_))));

    let deleted = service.delete(id, stranger_id).await.unwrap();
    assert!(!deleted);

    // The aggregate is still there for its owner
    let aggregate = service.get(id, owner_id).await.unwrap();
    assert_eq!(aggregate.experiences.len(), 2);
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_delete_removes_aggregate() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    let deleted = service.delete(id, owner_id).await.unwrap();
    assert!(deleted);

    let get_result = service.get(id, owner_id).await;
    assert!(matches!(get_result, Err(ApiError::NotFound(_))));

    // Second delete is a no-op, not an error
    let deleted_again = service.delete(id, owner_id).await.unwrap();
    assert!(!deleted_again);
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_visibility_toggle() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    service.set_visibility(id, owner_id, true).await.unwrap();
    let aggregate = service.get(id, owner_id).await.unwrap();
    assert!(aggregate.resume.is_public);

    service.set_visibility(id, owner_id, false).await.unwrap();
    let aggregate = service.get(id, owner_id).await.unwrap();
    assert!(!aggregate.resume.is_public);
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_thumbnail_url_cached_on_json_blob() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    let previous = service
        .set_thumbnail(id, owner_id, "https://cdn.example.com/thumbnails/a.png")
        .await
        .unwrap();
    assert_eq!(previous, None);

    let aggregate = service.get(id, owner_id).await.unwrap();
    let blob = aggregate.resume.json.unwrap();
    assert_eq!(
        blob.get("thumbnailUrl").and_then(|v| v.as_str()),
        Some("https://cdn.example.com/thumbnails/a.png")
    );
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_thumbnail_replacement_surfaces_previous_url() {
    let db = setup_test_db().await;
    let service = ResumeService::new(db);

    let owner_id = Uuid::new_v4();
    let id = service.create(owner_id, create_request()).await.unwrap();

    service
        .set_thumbnail(id, owner_id, "https://cdn.example.com/thumbnails/a.png")
        .await
        .unwrap();

    // The replaced URL comes back so the caller can delete the old object
    let previous = service
        .set_thumbnail(id, owner_id, "https://cdn.example.com/thumbnails/b.png")
        .await
        .unwrap();
    assert_eq!(
        previous.as_deref(),
        Some("https://cdn.example.com/thumbnails/a.png")
    );

    let aggregate = service.get(id, owner_id).await.unwrap();
    let blob = aggregate.resume.json.unwrap();
    assert_eq!(
        blob.get("thumbnailUrl").and_then(|v| v.as_str()),
        Some("https://cdn.example.com/thumbnails/b.png")
    );
}
