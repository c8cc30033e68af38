#![no_main]

use libfuzzer_sys::fuzz_target;
use glslink::{MemorySource, PreprocessConfig, Shader, ShaderStage};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // The same text serves as the entry file, an include target and a compiler log.
        let mut files = MemorySource::new()
            .with_file("main.glsl", s)
            .with_file("lib.glsl", s);
        let config = PreprocessConfig::new().with_max_include_depth(8);
        if let Ok(shader) = Shader::load(ShaderStage::Fragment, "main.glsl", &mut files, &config) {
            assert_eq!(shader.source_text().lines().count(), shader.assembly().len());
            for _ in shader.remap(s) {}
        }
    }
});
