use chrono::{Duration, Utc};
use std::sync::Arc;
use std::thread;
use uuid::Uuid;
use vivarium_core::{
    InMemoryLivingBeingRepository, LivingBeing, LivingBeingProps, LivingBeingRepository,
    LivingBeingService, RepoError, Repository, SearchInput, SortDirection,
};

fn props(name: &str) -> LivingBeingProps {
    LivingBeingProps {
        name: name.to_string(),
        scientific_name: "Astyanax ribeirae".to_string(),
        location: "América do Sul".to_string(),
        size: "5".to_string(),
        life_expectancy: 5,
        ph: 6.4,
        temperature: 26.0,
        description: "O aquário deverá conter plantas formando zonas sombrias".to_string(),
        water_type_id: Uuid::parse_str("c68687ed-4668-4109-b4e9-110aa4efeadb").unwrap(),
        category_id: Uuid::parse_str("01a454b9-6d58-44a0-aa64-c7ba5d7df6a3").unwrap(),
    }
}

fn names(items: &[LivingBeing]) -> Vec<&str> {
    items.iter().map(|being| being.name.as_str()).collect()
}

/// Inserts beings with strictly increasing `created_at`, oldest first.
fn seed_aged(repo: &InMemoryLivingBeingRepository, names: &[&str]) -> Vec<LivingBeing> {
    let base = Utc::now() - Duration::hours(names.len() as i64);
    names
        .iter()
        .enumerate()
        .map(|(offset, name)| {
            let mut being = repo.create(props(name));
            being.created_at = base + Duration::minutes(offset as i64);
            being.updated_at = being.created_at;
            repo.insert(being).unwrap()
        })
        .collect()
}

#[test]
fn get_by_name_matches_exactly() {
    let repo = InMemoryLivingBeingRepository::new();
    let stored = repo.insert(repo.create(props("Lambari"))).unwrap();

    assert_eq!(repo.get_by_name("Lambari").unwrap(), stored);

    let err = repo.get_by_name("lambari").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Living being not found using name lambari"
    );
}

#[test]
fn conflicting_name_only_fails_when_name_exists() {
    let repo = InMemoryLivingBeingRepository::new();
    repo.conflicting_name("Lambari").unwrap();

    repo.insert(repo.create(props("Lambari"))).unwrap();

    repo.conflicting_name("Tetra").unwrap();
    let err = repo.conflicting_name("Lambari").unwrap_err();
    assert_eq!(
        err,
        RepoError::Conflict("There is already a living being with the name Lambari".to_string())
    );
}

#[test]
fn insert_unique_rejects_duplicate_name() {
    let repo = InMemoryLivingBeingRepository::new();
    repo.insert_unique(repo.create(props("Lambari"))).unwrap();

    let err = repo
        .insert_unique(repo.create(props("Lambari")))
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(repo.len(), 1);
}

#[test]
fn update_unique_allows_own_name_and_rejects_others() {
    let repo = InMemoryLivingBeingRepository::new();
    let lambari = repo.insert_unique(repo.create(props("Lambari"))).unwrap();
    repo.insert_unique(repo.create(props("Tetra"))).unwrap();

    let mut same_name = lambari.clone();
    same_name.size = "7".to_string();
    assert_eq!(repo.update_unique(same_name.clone()).unwrap(), same_name);

    let mut stolen = lambari.clone();
    stolen.name = "Tetra".to_string();
    let err = repo.update_unique(stolen).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(repo.get_by_id(lambari.id).unwrap().name, "Lambari");
}

#[test]
fn search_defaults_to_newest_first() {
    let repo = InMemoryLivingBeingRepository::new();
    seed_aged(&repo, &["oldest", "middle", "newest"]);

    let result = repo.get(&SearchInput::default()).unwrap();

    assert_eq!(names(&result.data), vec!["newest", "middle", "oldest"]);
    assert_eq!(result.total, 3);
    assert_eq!(result.sort, None);
    assert_eq!(result.sort_dir, None);
}

#[test]
fn search_default_field_honours_requested_direction() {
    let repo = InMemoryLivingBeingRepository::new();
    seed_aged(&repo, &["oldest", "middle", "newest"]);

    let result = repo
        .get(&SearchInput {
            sort_dir: Some(SortDirection::Asc),
            ..SearchInput::default()
        })
        .unwrap();

    assert_eq!(names(&result.data), vec!["oldest", "middle", "newest"]);
}

#[test]
fn search_filters_by_name_and_sorts_by_name() {
    let repo = InMemoryLivingBeingRepository::new();
    seed_aged(&repo, &["Tetra Neon", "lambari", "Betta", "LAMBARI do rabo"]);

    let result = repo
        .get(&SearchInput {
            filter: Some("Lambari".to_string()),
            sort: Some("name".to_string()),
            sort_dir: Some(SortDirection::Asc),
            ..SearchInput::default()
        })
        .unwrap();

    assert_eq!(names(&result.data), vec!["LAMBARI do rabo", "lambari"]);
    assert_eq!(result.total, 2);
}

#[test]
fn search_with_empty_filter_matches_every_name() {
    let repo = InMemoryLivingBeingRepository::new();
    seed_aged(&repo, &["Tetra", "Betta", "Lambari"]);

    let result = repo
        .get(&SearchInput {
            filter: Some(String::new()),
            ..SearchInput::default()
        })
        .unwrap();

    assert_eq!(names(&result.data), vec!["Lambari", "Betta", "Tetra"]);
    assert_eq!(result.total, 3);
    assert_eq!(result.filter.as_deref(), Some(""));
}

#[test]
fn search_ignores_non_sortable_field() {
    let repo = InMemoryLivingBeingRepository::new();
    seed_aged(&repo, &["b", "a", "c"]);

    let result = repo
        .get(&SearchInput {
            sort: Some("scientific_name".to_string()),
            sort_dir: Some(SortDirection::Asc),
            ..SearchInput::default()
        })
        .unwrap();

    assert_eq!(names(&result.data), vec!["b", "a", "c"]);
    assert_eq!(result.sort.as_deref(), Some("scientific_name"));
}

#[test]
fn concurrent_unique_inserts_keep_names_unique() {
    let repo = Arc::new(InMemoryLivingBeingRepository::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || repo.insert_unique(repo.create(props("Lambari"))))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .all(RepoError::is_conflict));
    assert_eq!(repo.len(), 1);
}

#[test]
fn service_create_rejects_duplicate_name() {
    let service = LivingBeingService::new(InMemoryLivingBeingRepository::new());
    let created = service.create(props("Lambari")).unwrap();

    assert_eq!(service.get(created.id).unwrap(), created);
    assert_eq!(service.get_by_name("Lambari").unwrap(), created);

    let err = service.create(props("Lambari")).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(service.repository().len(), 1);
}

#[test]
fn service_update_replaces_fields_and_refreshes_updated_at() {
    let service = LivingBeingService::new(InMemoryLivingBeingRepository::new());
    let created = service.create(props("Lambari")).unwrap();

    let mut edited = props("editado Lambari");
    edited.life_expectancy = 2;
    edited.ph = 7.4;
    let updated = service.update(created.id, edited).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.name, "editado Lambari");
    assert_eq!(updated.life_expectancy, 2);
    assert_eq!(service.get(created.id).unwrap(), updated);
}

#[test]
fn service_update_missing_id_fails_with_not_found() {
    let service = LivingBeingService::new(InMemoryLivingBeingRepository::new());
    let id = Uuid::new_v4();

    let err = service.update(id, props("Lambari")).unwrap_err();
    assert_eq!(err, RepoError::not_found("Living being", id));
}

#[test]
fn service_delete_removes_record() {
    let service = LivingBeingService::new(InMemoryLivingBeingRepository::new());
    let created = service.create(props("Lambari")).unwrap();
    service.create(props("Tetra")).unwrap();

    let removed = service.delete(created.id).unwrap();
    assert_eq!(removed, created);
    assert!(service.get(created.id).unwrap_err().is_not_found());

    let page = service.search(&SearchInput::default()).unwrap();
    assert_eq!(names(&page.data), vec!["Tetra"]);
}
