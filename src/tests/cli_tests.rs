use super::*;
use crate::notify::RecordingNotifier;
use crate::settings::store::MemoryKvStore;
use crate::settings::TRANSPARENT_BACKGROUND;

#[test]
fn test_no_subcommand_means_menu() {
    let cli = Cli::try_parse_from(["unicom-usage"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.verbose);
}

#[test]
fn test_render_defaults_to_medium() {
    let cli = Cli::try_parse_from(["unicom-usage", "render"]).unwrap();
    match cli.command {
        Some(Command::Render(args)) => {
            assert_eq!(args.size, WidgetSize::Medium);
            assert!(!args.no_color);
        }
        _ => panic!("expected render"),
    }
}

#[test]
fn test_preview_accepts_size_and_global_flags() {
    let cli = Cli::try_parse_from([
        "unicom-usage",
        "preview",
        "--size",
        "large",
        "--no-color",
        "--config",
        "/tmp/c.yaml",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
    match cli.command {
        Some(Command::Preview(args)) => {
            assert_eq!(args.size, WidgetSize::Large);
            assert!(args.no_color);
        }
        _ => panic!("expected preview"),
    }
}

#[test]
fn test_unknown_size_rejected() {
    assert!(Cli::try_parse_from(["unicom-usage", "render", "--size", "huge"]).is_err());
}

#[test]
fn test_set_parses_fields() {
    let cli = Cli::try_parse_from([
        "unicom-usage",
        "set",
        "--phone",
        "18600000000",
        "--cookie",
        "JSESSIONID=abc",
    ])
    .unwrap();
    match cli.command {
        Some(Command::Set(args)) => {
            assert_eq!(args.phone.as_deref(), Some("18600000000"));
            assert_eq!(args.cookie.as_deref(), Some("JSESSIONID=abc"));
            assert_eq!(args.box_bg, None);
        }
        _ => panic!("expected set"),
    }
}

#[test]
fn test_set_apply_writes_given_fields_only() {
    let mut store = MemoryKvStore::with(&[(keys::TEXT_COLOR, "#000000")]);
    let notifier = RecordingNotifier::default();
    let args = SetArgs {
        phone: Some(" 18600000000 ".into()),
        box_bg: Some("".into()),
        ..Default::default()
    };

    args.apply(&mut store, &notifier).unwrap();

    assert_eq!(store.get(keys::PHONE_NUMBER).as_deref(), Some("18600000000"));
    assert_eq!(store.get(keys::BOX_BG).as_deref(), Some(""));
    assert_eq!(store.get(keys::TEXT_COLOR).as_deref(), Some("#000000"));
    assert_eq!(store.saves, 1);
    assert_eq!(notifier.taken().len(), 1);
}

#[test]
fn test_set_apply_requires_a_field() {
    let mut store = MemoryKvStore::default();
    let notifier = RecordingNotifier::default();
    let err = SetArgs::default().apply(&mut store, &notifier).unwrap_err();
    assert!(err.to_string().contains("Nothing to set"));
    assert_eq!(store.saves, 0);
}

#[test]
fn test_set_apply_transparent_background() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("wall.png");
    std::fs::write(&image, b"png").unwrap();

    let mut store = MemoryKvStore::default();
    let notifier = RecordingNotifier::default();
    SetArgs {
        transparent_bg: Some(image.clone()),
        ..Default::default()
    }
    .apply(&mut store, &notifier)
    .unwrap();

    assert_eq!(store.get(keys::BOX_BG).as_deref(), Some(TRANSPARENT_BACKGROUND));
    let stored = PathBuf::from(store.get(keys::TRANSPARENT_BG).unwrap());
    assert_eq!(stored, image.canonicalize().unwrap());
}

#[test]
fn test_set_apply_missing_image_fails() {
    let mut store = MemoryKvStore::default();
    let notifier = RecordingNotifier::default();
    let result = SetArgs {
        transparent_bg: Some(PathBuf::from("/definitely/not/here.png")),
        ..Default::default()
    }
    .apply(&mut store, &notifier);

    assert!(result.is_err());
    assert!(notifier.taken().is_empty());
}
