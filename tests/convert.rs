use std::path::Path;

use clap::Parser;
use image_uri_lib::{
    convert_folder, data_uri_preview, encode_image_file, run, Cli, ConvertConfig, ConvertOutcome,
    DataUri, MimeRule, OutputLocation, OUTPUT_FILE_NAME,
};
use tokio::fs;

async fn write_file(dir: &Path, name: &str, bytes: &[u8]) {
    fs::write(dir.join(name), bytes).await.unwrap();
}

async fn written(config: &ConvertConfig) -> image_uri_lib::ConversionReport {
    match convert_folder(config).await.unwrap() {
        ConvertOutcome::Written(report) => report,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn data_uris_decode_to_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let files: [(&str, &str, Vec<u8>); 5] = [
        ("logo.png", "image/png", b"\x89PNG\r\n\x1a\n\x00\x00".to_vec()),
        ("photo.JPG", "image/jpeg", vec![0xff, 0xd8, 0xff, 0xe0]),
        ("scan.jpeg", "image/jpeg", (0..=255u8).collect()),
        ("anim.gif", "image/gif", b"GIF89a".to_vec()),
        ("pic.WebP", "image/webp", Vec::new()),
    ];
    for (name, _, bytes) in &files {
        write_file(dir.path(), name, bytes).await;
    }

    let report = written(&ConvertConfig::general(dir.path())).await;
    assert_eq!(report.count(), files.len());

    for (name, mime, bytes) in &files {
        let uri = DataUri::parse(&report.images[*name]).unwrap();
        assert_eq!(uri.mime_type(), *mime, "{name}");
        assert_eq!(&uri.decode().unwrap(), bytes, "{name}");
    }
}

#[tokio::test]
async fn output_matches_report_and_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "a.png", b"\x89PNG").await;
    write_file(dir.path(), "b.gif", b"GIF87a").await;
    write_file(dir.path(), "c.txt", b"ignored").await;

    let config = ConvertConfig::general(dir.path());
    let first_report = written(&config).await;
    let output = dir.path().join(OUTPUT_FILE_NAME);
    let first = fs::read(&output).await.unwrap();

    let second_report = written(&config).await;
    let second = fs::read(&output).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first_report, second_report);

    let keys: Vec<&String> = first_report.images.keys().collect();
    let json = String::from_utf8(first).unwrap();
    let parsed: indexmap::IndexMap<String, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.keys().collect::<Vec<_>>(), keys);
    assert!(!parsed.contains_key("c.txt"));
    assert!(json.starts_with("{\n  \""));
}

#[tokio::test]
async fn output_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join(OUTPUT_FILE_NAME);
    fs::write(&output, r#"{"old.png": "data:image/png;base64,"}"#)
        .await
        .unwrap();
    write_file(dir.path(), "new.png", b"\x89PNG").await;

    written(&ConvertConfig::general(dir.path())).await;

    let json = fs::read_to_string(&output).await.unwrap();
    assert!(json.contains("new.png"));
    assert!(!json.contains("old.png"));
}

#[tokio::test]
async fn primary_preset_restricts_types_and_mime() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("primary");
    fs::create_dir(&source).await.unwrap();
    write_file(&source, "a.jpg", b"\xff\xd8").await;
    write_file(&source, "b.jpeg", b"\xff\xd8").await;
    write_file(&source, "c.png", b"\x89PNG").await;
    write_file(&source, "d.gif", b"GIF89a").await;

    let mut config = ConvertConfig::primary(Some(source.clone()));
    let output = dir.path().join("converted_images.json");
    config.output = OutputLocation::Path(output.clone());

    let report = written(&config).await;

    assert_eq!(report.output_path, output);
    assert_eq!(report.count(), 3);
    assert!(report.images["a.jpg"].starts_with("data:image/jpeg;base64,"));
    assert!(report.images["b.jpeg"].starts_with("data:image/png;base64,"));
    assert!(report.images["c.png"].starts_with("data:image/png;base64,"));
    assert!(!report.images.contains_key("d.gif"));
    assert!(!source.join(OUTPUT_FILE_NAME).exists());
}

#[tokio::test]
async fn mime_table_and_png_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("a.png", "image/png"),
        ("b.JPG", "image/jpeg"),
        ("c.jpeg", "image/jpeg"),
        ("d.gif", "image/gif"),
        ("e.webp", "image/webp"),
        ("f.bmp", "image/png"),
        ("g", "image/png"),
    ];

    for (name, mime) in cases {
        let path = dir.path().join(name);
        fs::write(&path, b"\x00\x01").await.unwrap();
        let uri = encode_image_file(&path, MimeRule::Table).await.unwrap();
        assert_eq!(uri, format!("data:{mime};base64,AAE="), "{name}");
    }
}

#[tokio::test]
async fn single_image_run_prints_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m_00.png");
    fs::write(&path, vec![7u8; 300]).await.unwrap();

    let cli = Cli::try_parse_from(["image-uri", "--single", path.to_str().unwrap()]).unwrap();
    let mut out = Vec::new();
    let outcomes = run(cli, &mut out).await.unwrap();

    let [ConvertOutcome::Encoded { data_uri, .. }] = outcomes.as_slice() else {
        panic!("unexpected outcomes: {outcomes:?}");
    };
    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed, format!("{}\n", data_uri_preview(data_uri)));
    assert_eq!(printed.trim_end().len(), "Data URI preview: ".len() + 100 + 3);
    assert!(!dir.path().join(OUTPUT_FILE_NAME).exists());
}

#[tokio::test]
async fn folder_run_reports_saved_path() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "a.png", b"\x89PNG").await;

    let cli = Cli::try_parse_from(["image-uri", dir.path().to_str().unwrap()]).unwrap();
    let mut out = Vec::new();
    run(cli, &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    let output = dir.path().join(OUTPUT_FILE_NAME);
    assert!(printed.starts_with("Converting: a.png\n\n✓ Converted 1 images\n"));
    assert!(printed.contains(&format!("✓ Results saved to: {}\n", output.display())));
}
