//! Directory discovery for codebase loading.

use std::fs;

use koscope::{Codebase, DeclQueries, Traversal};

#[test]
fn discovers_kotlin_files_recursively() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("src/main/kotlin/com/sample");
    fs::create_dir_all(&nested).expect("create nested dirs");

    fs::write(
        nested.join("User.kt"),
        "package com.sample\n\nclass User\n",
    )
    .expect("write User.kt");
    fs::write(
        dir.path().join("Top.kt"),
        "class TopLevel\n",
    )
    .expect("write Top.kt");
    fs::write(dir.path().join("README.md"), "not kotlin").expect("write README");

    let codebase = Codebase::from_directory(dir.path()).expect("directory should load");
    let scope = codebase.scope();

    assert_eq!(scope.files().count(), 2);
    assert!(scope.has_all_declarations_with_names(Traversal::ALL, &["User", "TopLevel"]));
}

#[test]
fn empty_directory_loads_an_empty_codebase() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codebase = Codebase::from_directory(dir.path()).expect("directory should load");
    assert!(!codebase.scope().has_declarations(Traversal::ALL));
}
