use sample_builder::{
    load_schema, render_categories, run_check, run_generate, run_shape, CheckOpts, GenerateOpts,
    SchemaOpts, ShapeOpts,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn bookstore() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/bookstore.yaml")
}

fn schema_opts(path: &Path) -> SchemaOpts {
    SchemaOpts {
        schema: path.to_path_buf(),
    }
}

/// Generated code with all whitespace removed, so checks do not depend on layout.
fn squashed(code: &str) -> String {
    code.split_whitespace().collect()
}

fn write_schema(dir: &TempDir, yaml: &str) -> PathBuf {
    let path = dir.path().join("schema.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

const BROKEN: &str = r#"
types:
  - name: Tag
    kind: struct
    sample: { count: 2, mode: fixed }
    members:
      - { name: label, type: String }
  - name: Post
    kind: struct
    sample: { count: 1 }
    members:
      - { name: tag, type: Tag }
      - { name: views, type: i64, category: price }
  - name: Comment
    kind: struct
    sample: { count: 1 }
    members:
      - { name: post, type: Post }
"#;

#[test]
fn test_bookstore_schema_loads() {
    let schema = load_schema(&bookstore()).unwrap();
    assert_eq!(
        schema.type_names(),
        vec!["Author", "Book", "Shelf", "Availability", "StoreFront"]
    );
    assert!(schema.is_external("Isbn"));
}

#[test]
fn test_generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nested/samples.rs");
    let opts = GenerateOpts {
        schema: schema_opts(&bookstore()),
        output: Some(output.clone()),
        member: None,
        data_crate: None,
    };

    let summary = run_generate(&opts).unwrap();
    assert_eq!(summary.generated, 5);
    assert_eq!(summary.errors, 0);
    assert!(summary.ensure_clean().is_ok());

    let code = std::fs::read_to_string(&output).unwrap();
    assert!(code.starts_with("// @generated by sample-builder. Do not edit."));
    assert!(code.contains("impl Book {"));

    let code = squashed(&code);
    assert!(code.contains("Self::new(Isbn::sample().remove(0),"));
    assert!(code.contains("Self(String::from(\"HelloWorld\"),vec![Book::sample().remove(0)],"));
    assert!(code.contains("Self::InStock{copies:0}"));
    assert!(code.contains("Self::OutOfPrint"));
    assert_eq!(code.matches("Self::new(").count(), 5);
}

#[test]
fn test_generate_overrides_member_and_crate() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("samples.rs");
    let opts = GenerateOpts {
        schema: schema_opts(&bookstore()),
        output: Some(output.clone()),
        member: Some("fixtures".to_string()),
        data_crate: Some("crate::data".to_string()),
    };
    run_generate(&opts).unwrap();

    let code = squashed(&std::fs::read_to_string(&output).unwrap());
    assert!(code.contains("pubfnfixtures()->Vec<Self>"));
    assert!(code.contains("Author::fixtures().remove(0)"));
    assert!(code.contains("crate::data::DataGenerator::random("));
    assert!(!code.contains("::sample_data"));
}

#[test]
fn test_generate_keeps_healthy_types_on_error() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, BROKEN);
    let output = dir.path().join("out.rs");
    let opts = GenerateOpts {
        schema: schema_opts(&schema),
        output: Some(output.clone()),
        member: None,
        data_crate: None,
    };

    let summary = run_generate(&opts).unwrap();
    assert_eq!(summary.generated, 1);
    assert_eq!(summary.failed, vec!["Post", "Comment"]);
    assert_eq!(summary.errors, 2);

    let err = summary.ensure_clean().unwrap_err();
    assert!(err.to_string().contains("Post, Comment"));

    let code = std::fs::read_to_string(&output).unwrap();
    assert!(code.contains("impl Tag {"));
    assert!(!code.contains("impl Post {"));
}

#[test]
fn test_check_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, BROKEN);
    let summary = run_check(&CheckOpts {
        schema: schema_opts(&schema),
        quiet: false,
    })
    .unwrap();
    assert_eq!(summary.errors, 2);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    let clean = run_check(&CheckOpts {
        schema: schema_opts(&bookstore()),
        quiet: false,
    })
    .unwrap();
    assert_eq!(clean.errors, 0);
    assert_eq!(clean.generated, 5);
}

#[test]
fn test_quiet_check_counts_logged_diagnostics() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, BROKEN);
    let summary = run_check(&CheckOpts {
        schema: schema_opts(&schema),
        quiet: true,
    })
    .unwrap();
    assert_eq!(summary.errors, 2);
    assert_eq!(summary.warnings, 0);
    assert_eq!(summary.failed, vec!["Post", "Comment"]);
    assert!(summary.ensure_clean().is_err());
}

#[test]
fn test_invalid_member_override_is_an_error() {
    let dir = TempDir::new().unwrap();
    let opts = GenerateOpts {
        schema: schema_opts(&bookstore()),
        output: Some(dir.path().join("samples.rs")),
        member: Some("fn".to_string()),
        data_crate: None,
    };
    let err = run_generate(&opts).unwrap_err();
    assert!(format!("{err:#}").contains("'fn' is not a valid Rust name"));
}

#[test]
fn test_documented_schemas_exist() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    for source in ["src/main.rs", "src/lib.rs"] {
        let text = std::fs::read_to_string(root.join(source)).unwrap();
        let mentioned: Vec<&str> = text
            .split_whitespace()
            .filter(|word| word.starts_with("schemas/") || word.starts_with("SAMPLE_BUILDER_SCHEMA="))
            .map(|word| word.trim_start_matches("SAMPLE_BUILDER_SCHEMA="))
            .collect();
        assert!(!mentioned.is_empty(), "{source} documents no schema");
        for path in mentioned {
            assert!(root.join(path).is_file(), "{source} mentions missing {path}");
        }
    }
}

#[test]
fn test_missing_schema_is_reported_with_path() {
    let err = run_check(&CheckOpts {
        schema: schema_opts(Path::new("/nonexistent/schema.yaml")),
        quiet: false,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load schema from"));
}

#[test]
fn test_shape_of_single_type() {
    let opts = ShapeOpts {
        schema: schema_opts(&bookstore()),
        type_name: Some("Book".to_string()),
    };
    let mut out = Vec::new();
    run_shape(&opts, &mut out).unwrap();

    let yaml = String::from_utf8(out).unwrap();
    assert!(yaml.contains("kind: struct"));
    assert!(yaml.contains("name: new"));
    assert!(!yaml.contains("display_title"));
}

#[test]
fn test_shape_of_unknown_type_fails() {
    let opts = ShapeOpts {
        schema: schema_opts(&bookstore()),
        type_name: Some("Magazine".to_string()),
    };
    let err = run_shape(&opts, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("Magazine"));
}

#[test]
fn test_shape_reports_empty_enum() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(
        &dir,
        "types:\n  - { name: Never, kind: enum, sample: { count: 1 } }\n  - { name: Unit, kind: struct, sample: { count: 1 } }\n",
    );
    let opts = ShapeOpts {
        schema: schema_opts(&schema),
        type_name: None,
    };
    let mut out = Vec::new();
    assert!(run_shape(&opts, &mut out).is_err());
    let yaml = String::from_utf8(out).unwrap();
    assert!(yaml.contains("name: Unit"));
    assert!(!yaml.contains("Never"));
}

#[test]
fn test_categories_table() {
    let table = render_categories();
    assert!(table.contains("email"));
    assert!(table.contains("image(width: W, height: H)"));
}
