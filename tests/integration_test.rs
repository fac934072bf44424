//! Integration tests for barillet.
#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use barillet::io::formats::pdf::{RecordingCanvas, layout_barillet};
use barillet::io::{ExportService, Format, ImportError, ImportService};
use barillet::models::{BarilletDraft, Identity, Session, ThemeDuration, ThemeType};
use barillet::storage::{FilesystemBackend, MemoryBackend, PersistenceBackend};
use barillet::{
    Barillet, BarilletService, Error, Theme, calculate_barillet_stats, validate_barillet,
};

fn session(uid: &str) -> Session {
    Session::signed_in(Identity::new(uid))
}

fn service() -> BarilletService {
    BarilletService::new(Arc::new(MemoryBackend::new()))
}

fn sample_themes() -> Vec<Theme> {
    (0..18)
        .map(|i| {
            let theme = Theme::new().with_title(format!("Thème {}", i + 1));
            if i % 3 == 0 {
                theme
                    .with_type(ThemeType::Comparee)
                    .with_category("Chantée")
                    .with_duration(ThemeDuration::fixed("2:30"))
            } else {
                theme.with_notes("sans parole au début")
            }
        })
        .collect()
}

#[test]
fn test_error_types() {
    let err = Error::InvalidInput("test message".to_string());
    assert!(err.to_string().contains("invalid input"));

    let err = Error::Validation {
        errors: vec!["Title is required".into(), "User ID is required".into()],
    };
    assert_eq!(
        err.to_string(),
        "validation failed: Title is required, User ID is required"
    );

    let err = Error::from(ImportError::MissingThemes);
    assert_eq!(
        err.to_string(),
        "Le fichier JSON doit contenir un tableau de thèmes"
    );

    let err = Error::FeatureNotEnabled("pdf-export".to_string());
    assert!(err.to_string().contains("not enabled"));
}

#[test]
fn test_export_then_import_round_trip() {
    let service = service();
    let alice = session("alice");
    let id = service
        .create(
            &alice,
            BarilletDraft::default()
                .with_title("Soirée")
                .with_location("Salle des fêtes")
                .with_themes(sample_themes()),
        )
        .unwrap();
    let original = service.get(&id).unwrap();

    let artifact = ExportService::new().export(&original, Format::Json).unwrap();
    assert_eq!(artifact.filename, "soire.json");
    let content = String::from_utf8(artifact.bytes).unwrap();

    let imported_id = ImportService::new(service.clone())
        .import_from_reader("soire.json", content.as_bytes(), &alice)
        .unwrap();
    let imported = service.get(&imported_id).unwrap();

    assert_ne!(imported_id, id);
    assert_eq!(imported.title, "Soirée (importé)");
    assert_eq!(imported.location, original.location);
    assert_eq!(imported.date, original.date);
    assert_eq!(imported.themes, original.themes);
    assert_eq!(
        calculate_barillet_stats(&imported),
        calculate_barillet_stats(&original)
    );
}

#[test]
fn test_seventeen_themes_fail_validation() {
    let mut barillet = Barillet::new_empty("alice");
    barillet.themes.pop();
    let result = validate_barillet(&barillet);
    assert!(!result.valid);
    assert!(
        result
            .errors
            .contains(&"barillet must have exactly 18 themes".to_string())
    );

    let err = service()
        .create(
            &session("alice"),
            BarilletDraft::default().with_themes(barillet.themes),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_nineteen_theme_import_is_rejected() {
    let mut document = serde_json::to_value(barillet::io::ExportableBarillet::from(
        &Barillet::new_empty("alice"),
    ))
    .unwrap();
    let extra = document["themes"][0].clone();
    document["themes"].as_array_mut().unwrap().push(extra);

    let service = service();
    let err = ImportService::new(service)
        .import_document(&document, &session("alice"))
        .unwrap_err();
    match err {
        Error::Import(e) => {
            assert_eq!(e, ImportError::WrongThemeCount { found: 19 });
            assert_eq!(
                e.to_string(),
                "Le fichier doit contenir exactement 18 thèmes (trouvé: 19)"
            );
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pdf_layout_paginates_eighteen_cards() {
    let mut barillet = Barillet::new_empty("alice");
    barillet.themes = sample_themes();
    let mut canvas = RecordingCanvas::new();
    layout_barillet(&barillet, &mut canvas);
    assert_eq!(canvas.page_count(), 2);

    let (page, ..) = canvas.find_text("Thème 9").unwrap();
    assert_eq!(page, 0);
    let (page, ..) = canvas.find_text("Thème 10").unwrap();
    assert_eq!(page, 1);
    assert!(canvas.find_text("2x 2:30").is_some());
}

#[test]
fn test_every_available_format_exports() {
    let barillet = Barillet::new_empty("alice");
    for format in Format::all() {
        match ExportService::new().export(&barillet, *format) {
            Ok(artifact) => {
                assert!(!artifact.bytes.is_empty());
                assert!(artifact.filename.ends_with(format.extension()));
            },
            Err(Error::FeatureNotEnabled(_)) => assert!(!format.is_available()),
            Err(other) => panic!("{format} export failed: {other}"),
        }
    }
}

#[test]
fn test_duplicate_keeps_themes() {
    let service = service();
    let alice = session("alice");
    let id = service
        .create(
            &alice,
            BarilletDraft::default()
                .with_title("Finale")
                .with_themes(sample_themes()),
        )
        .unwrap();

    let copy_id = service.duplicate(&alice, &id).unwrap();
    let copy = service.get(&copy_id).unwrap();
    assert_ne!(copy_id, id);
    assert_eq!(copy.title, "Finale (copie)");
    assert_eq!(copy.themes, service.get(&id).unwrap().themes);
    assert_eq!(service.list(&alice).unwrap().len(), 2);

    let err = service.duplicate(&session("bob"), &id).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_filesystem_backend_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FilesystemBackend::with_create(dir.path()).unwrap());
    let service = BarilletService::new(backend.clone());
    let alice = session("alice");
    let id = service
        .create(&alice, BarilletDraft::default().with_themes(sample_themes()))
        .unwrap();

    let reopened = FilesystemBackend::with_create(dir.path()).unwrap();
    let stored = reopened.get(&id).unwrap().unwrap();
    assert_eq!(stored.themes, sample_themes());
    assert_eq!(stored.user_id, "alice");
    assert!(stored.created_at.is_some());
}

#[tokio::test]
async fn test_owner_watch_sees_only_own_changes() {
    let service = service();
    let alice = session("alice");
    let mut watch = service.watch_owner(&alice);
    assert!(watch.current().unwrap().is_empty());

    service
        .create(&session("bob"), BarilletDraft::default())
        .unwrap();
    service.create(&alice, BarilletDraft::default()).unwrap();

    let snapshot = watch.next_snapshot().await.unwrap().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].user_id, "alice");

    watch.unsubscribe();
    assert!(watch.next_snapshot().await.is_none());
}
