//! Integration tests: full load/flatten/render/remap cycles over the shader fixtures on disk

use std::fs;
use std::io;

use glslink::{FsSource, PreprocessConfig, PreprocessError, Shader, ShaderStage};

/// Load a fixture through the filesystem source, with the stage inferred from its extension.
fn load_fixture(path: &str) -> Result<Shader, PreprocessError> {
    let stage = glslink_core::stages::from_path(path);
    Shader::load(stage, path, &mut FsSource, &PreprocessConfig::default())
}

#[test]
fn test_basic_include() {
    let shader = load_fixture("tests/fixtures/basic/main.frag").unwrap();
    assert_eq!(shader.stage(), ShaderStage::Fragment);
    assert_eq!(shader.version(), Some("450"));
    assert_eq!(
        shader.dependencies().collect::<Vec<_>>(),
        vec!["tests/fixtures/basic/common.glsl"]
    );

    let lines: Vec<&str> = shader.source_text().lines().collect();
    assert_eq!(lines.len(), shader.assembly().len());
    assert_eq!(lines[0], "#version 450");
    assert_eq!(lines[1], "//tests/fixtures/basic/common.glsl");
    assert_eq!(lines[2], "//#version 450");
    assert_eq!(lines[3], "vec4 tint() { return vec4(1.0); }");
}

#[test]
fn test_diamond_loads_shared_file_once() {
    let shader = load_fixture("tests/fixtures/diamond/main.vert").unwrap();
    assert_eq!(
        shader.dependencies().collect::<Vec<_>>(),
        vec![
            "tests/fixtures/diamond/a.glsl",
            "tests/fixtures/diamond/shared.glsl",
            "tests/fixtures/diamond/b.glsl",
        ]
    );

    let text = shader.source_text();
    assert_eq!(text.matches("float shared()").count(), 1);
    assert_eq!(text.matches("// end tests/fixtures/diamond/shared.glsl").count(), 1);
    // The second include of shared.glsl survives only as a comment.
    assert_eq!(text.matches("//tests/fixtures/diamond/shared.glsl").count(), 2);
}

#[test]
fn test_nested_directories_resolve_relative_to_includer() {
    let shader = load_fixture("tests/fixtures/nested/main.frag").unwrap();
    assert_eq!(
        shader.dependencies().collect::<Vec<_>>(),
        vec![
            "tests/fixtures/nested/lighting/light.glsl",
            "tests/fixtures/nested/lighting/brdf.glsl",
        ]
    );
}

#[test]
fn test_single_active_version() {
    for path in [
        "tests/fixtures/basic/main.frag",
        "tests/fixtures/diamond/main.vert",
        "tests/fixtures/nested/main.frag",
    ] {
        let shader = load_fixture(path).unwrap();
        let active = shader
            .source_text()
            .lines()
            .filter(|l| l.starts_with("#version"))
            .count();
        assert_eq!(active, 1, "{path}");
    }
}

#[test]
fn test_included_version_before_main_version_is_the_active_one() {
    let shader = load_fixture("tests/fixtures/late_version/main.frag").unwrap();
    assert_eq!(shader.version(), Some("450"));

    let lines: Vec<&str> = shader.source_text().lines().collect();
    assert_eq!(
        lines,
        vec![
            "//tests/fixtures/late_version/lib.glsl",
            "#version 450",
            "float f;",
            "// end tests/fixtures/late_version/lib.glsl",
            "//#version 450",
            "void main() { f = 1.0; }",
            "// end tests/fixtures/late_version/main.frag",
        ]
    );
}

#[test]
fn test_version_mismatch() {
    let err = load_fixture("tests/fixtures/mismatch/main.frag").unwrap_err();
    match err {
        PreprocessError::VersionMismatch { path, expected, found } => {
            assert_eq!(path, "tests/fixtures/mismatch/legacy.glsl");
            assert_eq!(expected, "450");
            assert_eq!(found.as_deref(), Some("330"));
        }
        other => panic!("expected a version mismatch, got {other:?}"),
    }
}

#[test]
fn test_missing_include_names_resolved_path() {
    let err = load_fixture("tests/fixtures/missing/main.frag").unwrap_err();
    match err {
        PreprocessError::FileOpen { path, source } => {
            assert_eq!(path, "tests/fixtures/missing/nope.glsl");
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected a file open failure, got {other:?}"),
    }
}

#[test]
fn test_missing_entry_file() {
    let err = load_fixture("tests/fixtures/does_not_exist.frag").unwrap_err();
    assert!(matches!(err, PreprocessError::FileOpen { .. }));
    assert_eq!(err.path(), "tests/fixtures/does_not_exist.frag");
}

#[test]
fn test_include_cycle() {
    let err = load_fixture("tests/fixtures/cycle/main.comp").unwrap_err();
    match err {
        PreprocessError::IncludeCycle { path, from } => {
            assert_eq!(path, "tests/fixtures/cycle/a.glsl");
            assert_eq!(from, "tests/fixtures/cycle/b.glsl");
        }
        other => panic!("expected an include cycle, got {other:?}"),
    }
}

#[test]
fn test_depth_limit_applies_to_fixtures() {
    let config = PreprocessConfig::new().with_max_include_depth(1);
    let err = Shader::load(
        ShaderStage::Fragment,
        "tests/fixtures/nested/main.frag",
        &mut FsSource,
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, PreprocessError::IncludeTooDeep { limit: 1, .. }));
    assert_eq!(err.path(), "tests/fixtures/nested/lighting/brdf.glsl");
}

#[test]
fn test_remap_validator_log() {
    let shader = load_fixture("tests/fixtures/basic/main.frag").unwrap();
    let log = fs::read_to_string("tests/fixtures/basic/validator.log").unwrap();
    let remapped: Vec<String> = shader.remap(&log).collect();
    assert_eq!(
        remapped,
        vec![
            "ERROR: fragment shader: \"tests/fixtures/basic/common.glsl\": 0:1: 'vec4' : no matching overloaded function found",
            "WARNING: fragment shader: \"tests/fixtures/basic/main.frag\": 0:4: 'color' : variable may be used before initialization",
            "ERROR: 2 compilation errors.  No code generated.",
        ]
    );
}

#[test]
fn test_locate_every_row_of_main_only_shader() {
    let shader = load_fixture("tests/fixtures/diamond/shared.glsl").unwrap();
    for row in 1..=shader.assembly().len() {
        let location = shader.locate(row).unwrap();
        assert_eq!(location.path, "tests/fixtures/diamond/shared.glsl");
        assert_eq!(location.line, row);
    }
    assert!(shader.locate(0).is_none());
    assert!(shader.locate(shader.assembly().len() + 1).is_none());
}

#[test]
fn test_reload_is_independent() {
    let first = load_fixture("tests/fixtures/diamond/main.vert").unwrap();
    let text = first.source_text().to_string();
    first.dispose();

    let second = load_fixture("tests/fixtures/diamond/main.vert").unwrap();
    assert_eq!(second.source_text(), text);
}
