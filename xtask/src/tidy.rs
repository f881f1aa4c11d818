use std::{
    fs,
    path::{Path, PathBuf},
};

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().to_path_buf()
}

fn rust_files(dir: &Path, acc: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            rust_files(&path, acc);
        } else if path.extension().is_some_and(|it| it == "rs") {
            acc.push(path);
        }
    }
}

#[test]
fn no_debugging_leftovers() {
    let mut files = Vec::new();
    rust_files(&project_root().join("crates"), &mut files);
    assert!(!files.is_empty());

    for file in files {
        let text = fs::read_to_string(&file).unwrap();
        for (i, line) in text.lines().enumerate() {
            let at = || format!("{}:{}", file.display(), i + 1);
            assert!(!line.contains("dbg!("), "dbg! left in {}", at());
            assert!(line.trim_end() == line, "trailing whitespace in {}", at());
            assert!(!line.contains('\t'), "tab in {}", at());
        }
    }
}

#[test]
fn versions_agree() {
    let manifest = fs::read_to_string(project_root().join("Cargo.toml")).unwrap();
    let version = manifest
        .lines()
        .find_map(|it| it.strip_prefix("version = \""))
        .and_then(|it| it.split('"').next())
        .unwrap();
    assert!(
        manifest.contains(&format!("trydoc-flags = {{ path = \"crates/trydoc-flags\", version = \"={version}\" }}")),
        "the `trydoc-flags` requirement does not match the workspace version {version}"
    );
}
