//! Snapshot tests for assembled sources and listings
//!
//! Run with: `cargo test --test render_snapshot_tests`
//! Review changes: `cargo insta review`

use glslink::{FsSource, PreprocessConfig, Shader};

fn load(path: &str) -> Shader {
    let stage = glslink_core::stages::from_path(path);
    Shader::load(stage, path, &mut FsSource, &PreprocessConfig::default())
        .unwrap_or_else(|e| panic!("failed to load {path}: {e}"))
}

#[test]
fn test_basic_source_text() {
    let shader = load("tests/fixtures/basic/main.frag");
    insta::assert_snapshot!(shader.source_text(), @r"
    #version 450
    //tests/fixtures/basic/common.glsl
    //#version 450
    vec4 tint() { return vec4(1.0); }
    // end tests/fixtures/basic/common.glsl
    out vec4 color;
    void main() { color = tint(); }
    // end tests/fixtures/basic/main.frag
    ");
}

#[test]
fn test_diamond_source_text() {
    let shader = load("tests/fixtures/diamond/main.vert");
    insta::assert_snapshot!(shader.source_text(), @r"
    #version 330
    //tests/fixtures/diamond/a.glsl
    //#version 330
    //tests/fixtures/diamond/shared.glsl
    //#version 330
    float shared() { return 1.0; }
    // end tests/fixtures/diamond/shared.glsl
    float a() { return shared(); }
    // end tests/fixtures/diamond/a.glsl
    //tests/fixtures/diamond/b.glsl
    //#version 330
    //tests/fixtures/diamond/shared.glsl
    float b() { return shared() * 2.0; }
    // end tests/fixtures/diamond/b.glsl
    void main() { gl_Position = vec4(a() + b()); }
    // end tests/fixtures/diamond/main.vert
    ");
}

#[test]
fn test_nested_source_text() {
    let shader = load("tests/fixtures/nested/main.frag");
    insta::assert_snapshot!(shader.source_text(), @r"
    #version 450
    //tests/fixtures/nested/lighting/light.glsl
    //#version 450
    //tests/fixtures/nested/lighting/brdf.glsl
    //#version 450
    vec3 brdf() { return vec3(0.5); }
    // end tests/fixtures/nested/lighting/brdf.glsl
    vec3 shade() { return brdf(); }
    // end tests/fixtures/nested/lighting/light.glsl
    layout(location = 0) out vec4 color;
    void main() { color = vec4(shade(), 1.0); }
    // end tests/fixtures/nested/main.frag
    ");
}

#[test]
fn test_basic_listing() {
    let shader = load("tests/fixtures/basic/main.frag");
    insta::assert_snapshot!(shader.listing(), @r"
    1: #version 450    [active version]
    2: //tests/fixtures/basic/common.glsl    [include]
    3: //#version 450    [duplicate version]
    4: vec4 tint() { return vec4(1.0); }
    5: // end tests/fixtures/basic/common.glsl
    6: out vec4 color;
    7: void main() { color = tint(); }
    8: // end tests/fixtures/basic/main.frag
    ");
}

#[test]
fn test_diagnostics_against_nested_shader() {
    let shader = load("tests/fixtures/nested/main.frag");
    let log = "ERROR: 0:9: 'brdf' : no matching overloaded function found\n\
               ERROR: 0:11: 'shade' : no matching overloaded function found\n\
               ERROR: 2 compilation errors.  No code generated.";
    let remapped = shader.remap(log).collect::<Vec<_>>().join("\n");
    insta::assert_snapshot!(remapped, @r#"
    ERROR: fragment shader: "tests/fixtures/nested/lighting/light.glsl": 0:3: 'brdf' : no matching overloaded function found
    ERROR: fragment shader: "tests/fixtures/nested/main.frag": 0:4: 'shade' : no matching overloaded function found
    ERROR: 2 compilation errors.  No code generated.
    "#);
}
