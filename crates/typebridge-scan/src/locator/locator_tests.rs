#![allow(non_snake_case)]

use super::*;

#[test]
fn SearchPathLocator___package_under_root___is_found() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("example.com/enum");
    std::fs::create_dir_all(&dir).unwrap();

    let locator = SearchPathLocator::new(vec![root.path().to_path_buf()]);

    assert_eq!(locator.locate("example.com/enum").unwrap(), dir);
}

#[test]
fn SearchPathLocator___later_root___is_searched_when_first_misses() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let dir = second.path().join("example.com/enum");
    std::fs::create_dir_all(&dir).unwrap();

    let locator = SearchPathLocator::new(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);

    assert_eq!(locator.locate("example.com/enum").unwrap(), dir);
}

#[test]
fn SearchPathLocator___override___takes_precedence() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("example.com/enum")).unwrap();
    let fixture = tempfile::tempdir().unwrap();

    let locator = SearchPathLocator::new(vec![root.path().to_path_buf()])
        .with_package("example.com/enum", fixture.path());

    assert_eq!(locator.locate("example.com/enum").unwrap(), fixture.path());
}

#[test]
fn SearchPathLocator___missing_package___reports_searched_paths() {
    let root = tempfile::tempdir().unwrap();
    let locator = SearchPathLocator::new(vec![root.path().to_path_buf()]);

    let err = locator.locate("example.com/missing").unwrap_err();

    match err {
        ScanError::PackageNotFound { package, searched } => {
            assert_eq!(package, "example.com/missing");
            assert_eq!(searched, vec![root.path().join("example.com/missing")]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn SearchPathLocator___no_roots___is_not_found() {
    let locator = SearchPathLocator::default();

    assert!(matches!(
        locator.locate("example.com/enum"),
        Err(ScanError::PackageNotFound { .. })
    ));
}
