//! End-to-end generation against a real filesystem.
//!
//! Each test loads a structure (inline or from `fixtures/`), generates into a
//! fresh temp directory with `DiskWriter`, and inspects the written files.

use pretty_assertions::assert_eq;
use readme_tree::builder::TreeBuilder;
use readme_tree::config::{self, ConfigError, ConfigFormat, Configuration};
use readme_tree::writer::{DiskWriter, WriteError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GO_BACK: &str = "\n---\n\n### [<- ATRAS](../README.md)\n\n---\n\n\n";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn generate(config: &Configuration, out: &Path) {
    TreeBuilder::new(out, config).generate(&DiskWriter).unwrap();
}

/// Every file under `root`, keyed by `/`-separated relative path.
fn read_tree(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    collect_files(root, root, &mut files);
    files
}

fn collect_files(dir: &Path, root: &Path, files: &mut BTreeMap<String, String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(&path, root, files);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(rel, fs::read_to_string(&path).unwrap());
        }
    }
}

#[test]
fn two_sections_end_to_end() {
    let config = config::parse_config(
        r#"{"main_title": "Book", "structure": {"alpha": {"title": "Alpha", "readme": "hi"}, "beta": {"readme": "{img:x}"}}}"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let tmp = TempDir::new().unwrap();
    generate(&config, tmp.path());

    let files = read_tree(tmp.path());
    assert_eq!(
        files.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["00_alpha/README.md", "10_beta/README.md", "README.md"]
    );
    assert_eq!(
        files["README.md"],
        "# Book\n\n---\n\n- ### [ALPHA](00_alpha/README.md)\n- ### [BETA](10_beta/README.md)\n"
    );
    assert!(files["00_alpha/README.md"].contains("hi"));

    let beta = &files["10_beta/README.md"];
    let image_lines: Vec<&str> = beta.lines().filter(|l| l.starts_with("![alt x](")).collect();
    assert_eq!(image_lines.len(), 1);
    assert!(image_lines[0].ends_with("/x?raw=true)"));
}

#[test]
fn fixture_produces_numbered_tree() {
    let config = config::load_config(&fixture("rule_book.yaml")).unwrap();
    let tmp = TempDir::new().unwrap();
    generate(&config, tmp.path());

    let files = read_tree(tmp.path());
    assert_eq!(
        files.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "00_introduction/README.md",
            "10_game_setup/00_components/README.md",
            "10_game_setup/10_board_layout/README.md",
            "10_game_setup/README.md",
            "20_rounds/00_player_phase/00_actions/README.md",
            "20_rounds/00_player_phase/README.md",
            "20_rounds/10_enemy_phase/README.md",
            "20_rounds/README.md",
            "README.md",
        ]
    );
}

#[test]
fn fixture_readme_contents() {
    let config = config::load_config(&fixture("rule_book.yaml")).unwrap();
    let tmp = TempDir::new().unwrap();
    generate(&config, tmp.path());
    let files = read_tree(tmp.path());

    assert_eq!(
        files["README.md"],
        "# Resident Evil - Rule Book\n\n---\n\n\
         - ### [INTRODUCTION](00_introduction/README.md)\n\
         - ### [SETUP](10_game_setup/README.md)\n\
         - ### [ROUNDS](20_rounds/README.md)\n"
    );

    assert_eq!(
        files["00_introduction/README.md"],
        "\n### Introduction\n\nWelcome to the board game.\n\
         ![alt cover.jpg](https://example.com/rule-book/img/cover.jpg?raw=true)\n\n"
    );

    assert_eq!(
        files["10_game_setup/README.md"],
        format!(
            "{GO_BACK}\n### Setup\n\nBefore the first scenario:\n\n\
             - ### [COMPONENTS](00_components/README.md)\n\
             - ### [BOARD LAYOUT](10_board_layout/README.md)\n\n\n"
        )
    );

    assert_eq!(
        files["10_game_setup/00_components/README.md"],
        format!(
            "{GO_BACK}\n### Components\n\n\
             ![alt components.png](https://example.com/rule-book/img/components.png?raw=true)\n\
             ![alt tokens.png](https://example.com/rule-book/img/tokens.png?raw=true)\n\
             See also {{ref:appendix}}\n\n"
        )
    );

    assert_eq!(
        files["20_rounds/00_player_phase/README.md"],
        format!(
            "{GO_BACK}\n### Player phase\n\n\n\
             - ### [ACTIONS](00_actions/README.md)\n\n\n"
        )
    );
}

#[test]
fn regeneration_is_byte_identical() {
    let config = config::load_config(&fixture("rule_book.yaml")).unwrap();
    let tmp = TempDir::new().unwrap();

    generate(&config, tmp.path());
    let first = read_tree(tmp.path());
    generate(&config, tmp.path());
    let second = read_tree(tmp.path());

    assert_eq!(first, second);
    assert_eq!(second["10_game_setup/README.md"].matches("COMPONENTS").count(), 1);
}

#[test]
fn parallel_generation_matches_sequential() {
    let config = config::load_config(&fixture("rule_book.yaml")).unwrap();
    let sequential = TempDir::new().unwrap();
    let parallel = TempDir::new().unwrap();

    generate(&config, sequential.path());
    TreeBuilder::new(parallel.path(), &config)
        .parallel(true)
        .generate(&DiskWriter)
        .unwrap();

    assert_eq!(read_tree(sequential.path()), read_tree(parallel.path()));
}

#[test]
fn all_formats_generate_the_same_tree() {
    let yaml = "main_title: Book\nstructure:\n  b:\n    readme: \"x\\\\ny\"\n    contents:\n      inner:\n        go_back: true\n  a: {}\n";
    let json = r#"{"main_title": "Book", "structure": {"b": {"readme": "x\\ny", "contents": {"inner": {"go_back": true}}}, "a": {}}}"#;
    let toml = "main_title = \"Book\"\n[structure.b]\nreadme = 'x\\ny'\n[structure.b.contents.inner]\ngo_back = true\n[structure.a]\n";

    let trees: Vec<BTreeMap<String, String>> = [
        (yaml, ConfigFormat::Yaml),
        (json, ConfigFormat::Json),
        (toml, ConfigFormat::Toml),
    ]
    .into_iter()
    .map(|(content, format)| {
        let config = config::parse_config(content, format).unwrap();
        let tmp = TempDir::new().unwrap();
        generate(&config, tmp.path());
        read_tree(tmp.path())
    })
    .collect();

    assert_eq!(trees[0], trees[1]);
    assert_eq!(trees[0], trees[2]);
    assert_eq!(trees[0]["00_b/README.md"], "\n### B\n\nx\ny\n- ### [INNER](00_inner/README.md)\n\n\n");
}

#[test]
fn output_path_blocked_by_file_aborts_run() {
    let config = config::load_config(&fixture("rule_book.yaml")).unwrap();
    let tmp = TempDir::new().unwrap();
    let blocked = tmp.path().join("out");
    fs::write(&blocked, "not a directory").unwrap();

    let err = TreeBuilder::new(&blocked, &config)
        .generate(&DiskWriter)
        .unwrap_err();
    assert!(matches!(err, WriteError::CreateDir { .. }), "{err}");
    assert_eq!(fs::read_to_string(&blocked).unwrap(), "not a directory");
}

#[test]
fn invalid_structure_fails_before_writing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.yaml");
    fs::write(
        &path,
        "main_title: Book\nstructure:\n  ok: {}\n  bad:\n    contents:\n      worse: [1, 2]\n",
    )
    .unwrap();

    let err = config::load_config(&path).unwrap_err();
    match err {
        ConfigError::InvalidNode { path, .. } => assert_eq!(path, "bad/worse"),
        other => panic!("unexpected error: {other}"),
    }
}
