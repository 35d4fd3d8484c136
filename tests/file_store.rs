//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;
    use std::path::PathBuf;

    use pagefreeze::core::SnapshotOptions;
    use pagefreeze::localizer::{FileStore, ResourceLocalizer};
    use pagefreeze::utils::url::Url;

    fn store_at(output_dir: PathBuf) -> FileStore {
        FileStore::new(
            Url::parse("https://example.com/").unwrap(),
            output_dir,
            &SnapshotOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn cleanup_tolerates_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path().join("snapshot"));

        store.cleanup().unwrap();
        store.cleanup().unwrap();
    }

    #[test]
    fn cleanup_removes_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("snapshot");
        fs::create_dir_all(output_dir.join("resources")).unwrap();
        fs::write(output_dir.join("resources").join("old-asset"), b"x").unwrap();
        fs::write(output_dir.join("index.html"), b"<html></html>").unwrap();

        let mut store = store_at(output_dir.clone());
        store.cleanup().unwrap();

        assert!(!output_dir.join("resources").exists());
        assert!(!output_dir.join("index.html").exists());
    }

    #[test]
    fn create_resources_path_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("deep").join("snapshot");

        let mut store = store_at(output_dir.clone());
        store.create_resources_path().unwrap();

        assert!(output_dir.join("resources").is_dir());
    }

    #[test]
    fn save_template_file_writes_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("snapshot");

        let mut store = store_at(output_dir.clone());
        store.save_template_file("<html><body>frozen</body></html>\n").unwrap();

        assert_eq!(
            fs::read_to_string(output_dir.join("index.html")).unwrap(),
            "<html><body>frozen</body></html>\n"
        );
        assert_eq!(store.template_path(), output_dir.join("index.html"));
    }

    #[test]
    fn get_url_for_file_is_root_relative() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path().join("snapshot"));

        assert_eq!(store.get_url_for_file("abc123-logo.png"), "/resources/abc123-logo.png");
    }

    #[test]
    fn custom_resources_dir_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("snapshot");
        let options = SnapshotOptions {
            resources_dir: Some("assets".to_string()),
            ..SnapshotOptions::default()
        };

        let mut store = FileStore::new(
            Url::parse("https://example.com/").unwrap(),
            output_dir.clone(),
            &options,
        )
        .unwrap();
        store.create_resources_path().unwrap();

        assert!(output_dir.join("assets").is_dir());
        assert_eq!(store.get_url_for_file("x"), "/assets/x");
        // With a custom asset directory, "/resources/..." is a live path again
        assert!(store.save_url_file("/assets/x").unwrap().is_none());
    }

    #[test]
    fn save_url_file_skips_unsupported_schemes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path().join("snapshot"));

        assert!(store
            .save_url_file("data:image/png;base64,iVBORw0KGgo=")
            .unwrap()
            .is_none());
        assert!(store.save_url_file("mailto:someone@example.com").unwrap().is_none());
    }

    #[test]
    fn save_url_file_skips_already_localized_references() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path().join("snapshot"));

        assert!(store.save_url_file("/resources/abc123-logo.png").unwrap().is_none());
    }

    #[test]
    fn file_identifier_is_deterministic_and_collision_free() {
        let first = Url::parse("https://example.com/img/logo.png").unwrap();
        let second = Url::parse("https://example.com/other/logo.png").unwrap();

        assert_eq!(FileStore::file_identifier(&first), FileStore::file_identifier(&first));
        // Same file name, different URLs: the digest prefix keeps them apart
        assert_ne!(FileStore::file_identifier(&first), FileStore::file_identifier(&second));
        assert!(FileStore::file_identifier(&first).ends_with("-logo.png"));
    }

    #[test]
    fn file_identifier_contains_no_path_separators() {
        let url = Url::parse("https://example.com/a%2Fb%5Cc.png").unwrap();
        let identifier = FileStore::file_identifier(&url);

        assert!(!identifier.contains('/'));
        assert!(!identifier.contains('\\'));
        assert!(identifier.ends_with("a_b_c.png"));
    }
}
