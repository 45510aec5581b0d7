#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;
use test_case::test_case;
use typebridge_core::{NamedType, SourceField};
use typebridge_emit::{EmitError, EmitResult};

const CONTAINER: &str = "github.com/moby/moby/api/types/container";
const MOUNT: &str = "github.com/moby/moby/api/types/mount";

const CONFIG: &str = r#"
[generator]
snapshot = "types.json"
output = "out"
roots = ["github.com/moby/moby/api/types/container.Container"]

[docs]
enabled = false
"#;

fn universe() -> TypeUniverse {
    TypeUniverse::new()
        .with(NamedType::new(
            CONTAINER,
            "Container",
            SourceType::structure(vec![
                SourceField::new("ID", SourceType::String).with_tag(r#"json:"Id""#),
                SourceField::new(
                    "Mounts",
                    SourceType::slice(SourceType::named(TypeKey::qualified(MOUNT, "Mount"))),
                ),
            ]),
        ))
        .with(NamedType::new(
            MOUNT,
            "Mount",
            SourceType::structure(vec![SourceField::new("Source", SourceType::String)]),
        ))
        .with(NamedType::new(CONTAINER, "Status", SourceType::String))
}

fn pipeline_with(config: &str, base_dir: &Path) -> Pipeline {
    let config = GeneratorConfig::from_str(config)
        .unwrap()
        .with_base_dir(base_dir);
    Pipeline::new(config, universe()).unwrap()
}

fn pipeline(base_dir: &Path) -> Pipeline {
    pipeline_with(CONFIG, base_dir)
}

struct FixedDocs;

impl DocLinkResolver for FixedDocs {
    fn resolve(&mut self, package: &str, symbol: &str) -> EmitResult<String> {
        Ok(format!("https://docs.example/{package}#{symbol}"))
    }
}

struct MissingDocs;

impl DocLinkResolver for MissingDocs {
    fn resolve(&mut self, package: &str, symbol: &str) -> EmitResult<String> {
        Err(EmitError::MissingAnchor {
            package: package.to_string(),
            symbol: symbol.to_string(),
            url: format!("https://docs.example/{package}"),
        })
    }
}

#[test]
fn Pipeline___new___rejects_invalid_config() {
    let config = GeneratorConfig::from_str(
        r#"
[generator]
snapshot = "types.json"
output = "out"
roots = []
"#,
    )
    .unwrap();

    let result = Pipeline::new(config, universe());

    assert!(matches!(result, Err(PipelineError::Core(_))));
}

#[test]
fn Pipeline___load___reads_config_and_snapshot() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("typebridge.toml"), CONFIG).unwrap();
    fs::write(
        temp.path().join("types.json"),
        universe().to_json().unwrap(),
    )
    .unwrap();

    let pipeline = Pipeline::load(temp.path().join("typebridge.toml")).unwrap();

    assert_eq!(pipeline.universe().len(), 3);
    assert_eq!(pipeline.config().output_dir(), temp.path().join("out"));
}

#[test]
fn Pipeline___load___missing_snapshot___fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("typebridge.toml"), CONFIG).unwrap();

    let result = Pipeline::load(temp.path().join("typebridge.toml"));

    assert!(matches!(result, Err(PipelineError::Core(_))));
}

#[test]
fn Pipeline___check___valid_roots___reports_counts() {
    let temp = TempDir::new().unwrap();

    let report = pipeline(temp.path()).check().unwrap();

    assert_eq!(report.roots, 1);
    assert_eq!(report.types, 3);
    assert!(report.unused_renames.is_empty());
}

#[test]
fn Pipeline___check___non_struct_root___is_invalid() {
    let temp = TempDir::new().unwrap();
    let config = CONFIG.replace("container.Container", "container.Status");

    let err = pipeline_with(&config, temp.path()).check().unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid root github.com/moby/moby/api/types/container.Status: underlying kind is string, expected struct"
    );
}

#[test]
fn Pipeline___check___unknown_root___fails() {
    let temp = TempDir::new().unwrap();
    let config = CONFIG.replace("container.Container", "container.Missing");

    let err = pipeline_with(&config, temp.path()).check().unwrap_err();

    assert!(matches!(err, PipelineError::Core(_)));
}

#[test]
fn Pipeline___check___replaced_root___is_invalid() {
    let temp = TempDir::new().unwrap();
    let config = format!(
        "{CONFIG}\n[replace]\n\"{CONTAINER}.Container\" = {{ schema = \"Schema.Unknown\" }}\n"
    );

    let err = pipeline_with(&config, temp.path()).check().unwrap_err();

    assert!(matches!(err, PipelineError::InvalidRoot { .. }));
    assert!(err.to_string().contains("Schema.Unknown"));
}

#[test]
fn Pipeline___check___stale_rename___is_reported() {
    let temp = TempDir::new().unwrap();
    let config = format!("{CONFIG}\n[rename]\n\"example.com/gone.Thing\" = \"GoneThing\"\n");

    let report = pipeline_with(&config, temp.path()).check().unwrap();

    assert_eq!(report.unused_renames, vec!["example.com/gone.Thing".to_string()]);
}

#[test]
fn Pipeline___reflect___follows_references() {
    let temp = TempDir::new().unwrap();
    let pipeline = pipeline(temp.path());

    let registry = pipeline.reflect(&pipeline.config().root_keys()).unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&TypeKey::qualified(MOUNT, "Mount")));
}

#[test]
fn Pipeline___inspect___renders_single_module() {
    let temp = TempDir::new().unwrap();

    let code = pipeline(temp.path())
        .inspect(&TypeKey::qualified(MOUNT, "Mount"))
        .unwrap();

    assert!(code.contains(r#"export class Mount extends Schema.Class<Mount>("Mount")("#));
    assert!(code.contains(r#"title: "mount.Mount","#));
    assert!(!code.contains("documentation:"));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn Pipeline___literals___package_without_sources___fails() {
    let temp = TempDir::new().unwrap();

    let result = pipeline(temp.path()).literals(&TypeKey::qualified(CONTAINER, "Status"));

    assert!(matches!(result, Err(PipelineError::Scan(_))));
}

#[test]
fn Pipeline___generate___docs_disabled___writes_modules_and_index() {
    let temp = TempDir::new().unwrap();

    let report = pipeline(temp.path()).generate().unwrap();

    let out = temp.path().join("out");
    assert_eq!(report.nodes, 2);
    assert_eq!(report.output_dir, out);
    assert_eq!(report.written.len(), 3);
    let index = fs::read_to_string(out.join("index.ts")).unwrap();
    assert_eq!(
        index,
        "export * from \"./Container.generated.js\";\nexport * from \"./Mount.generated.js\";\n"
    );
    let container = fs::read_to_string(out.join("Container.generated.ts")).unwrap();
    assert!(container.contains(r#"import * as Mount from "./Mount.generated.js";"#));
    assert!(!container.contains("documentation:"));
}

#[test]
fn Pipeline___generate___removes_stale_generated_files() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("Gone.generated.ts"), "stale").unwrap();
    fs::write(out.join("handwritten.ts"), "keep").unwrap();

    let report = pipeline(temp.path()).generate().unwrap();

    assert_eq!(report.removed, 1);
    assert!(!out.join("Gone.generated.ts").exists());
    assert!(out.join("handwritten.ts").exists());
}

#[test]
fn Pipeline___with_output___overrides_directory() {
    let temp = TempDir::new().unwrap();
    let elsewhere = temp.path().join("elsewhere");

    let report = pipeline(temp.path())
        .with_output(&elsewhere)
        .generate()
        .unwrap();

    assert_eq!(report.output_dir, elsewhere);
    assert!(elsewhere.join("Mount.generated.ts").exists());
    assert!(!temp.path().join("out").exists());
}

#[test]
fn Pipeline___generate_with___docs___adds_documentation_links() {
    let temp = TempDir::new().unwrap();

    pipeline(temp.path())
        .generate_with(Some(&mut FixedDocs))
        .unwrap();

    let mount = fs::read_to_string(temp.path().join("out/Mount.generated.ts")).unwrap();
    assert!(mount.contains(&format!(
        r#"documentation: "https://docs.example/{MOUNT}#Mount","#
    )));
}

#[test]
fn Pipeline___generate_with___missing_anchor___leaves_output_untouched() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("Old.generated.ts"), "previous").unwrap();

    let err = pipeline(temp.path())
        .generate_with(Some(&mut MissingDocs))
        .unwrap_err();

    assert!(matches!(err, PipelineError::Emit(EmitError::MissingAnchor { .. })));
    assert_eq!(
        fs::read_to_string(out.join("Old.generated.ts")).unwrap(),
        "previous"
    );
}

#[test_case("ts", "index.ts", "Mount.generated.ts" ; "typescript")]
#[test_case("mts", "index.mts", "Mount.generated.mts" ; "module typescript")]
fn Pipeline___generate___extension___names_files(
    extension: &str,
    index: &str,
    module: &str,
) {
    let temp = TempDir::new().unwrap();
    let config = CONFIG.replace(
        "output = \"out\"",
        &format!("output = \"out\"\nextension = \"{extension}\""),
    );

    pipeline_with(&config, temp.path()).generate().unwrap();

    assert!(temp.path().join("out").join(index).exists());
    assert!(temp.path().join("out").join(module).exists());
}

#[test]
fn Pipeline___without_docs___disables_documentation() {
    let temp = TempDir::new().unwrap();
    let config = CONFIG.replace("enabled = false", "enabled = true");

    let pipeline = pipeline_with(&config, temp.path()).without_docs();

    assert!(!pipeline.config().docs.enabled);
}
