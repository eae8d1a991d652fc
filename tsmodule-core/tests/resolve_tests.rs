//! 集成测试 - 解析与加载 (MemoryFileSystem + 真实文件系统)

use std::fs;
use std::path::Path;
use tsmodule_config::ExtensionConfig;
use tsmodule_core::{
    LoadOutcome, LoadTransformer, Resolution, ResolutionContext, SpecifierResolver,
    StripTransform, Url,
};
use tsmodule_vfs::{MemoryFileSystem, NativeFileSystem, VirtualFileSystem};

/// 辅助函数：在给定文件系统上解析
fn resolve(vfs: &dyn VirtualFileSystem, cwd: &Path, specifier: &str, importer: Option<&Url>) -> Resolution {
    let resolver = SpecifierResolver::new(vfs, cwd);
    let context = ResolutionContext {
        importer: importer.cloned(),
    };
    resolver.resolve(specifier, &context, &ExtensionConfig::defaults())
}

fn file_url(path: &Path) -> Url {
    Url::from_file_path(path).unwrap()
}

#[test]
fn test_resolution_is_idempotent() {
    let fs = MemoryFileSystem::with_files([("/src/util.ts", ""), ("/src/index.ts", "")]);
    let importer = Url::parse("file:///src/index.ts").unwrap();
    let first = resolve(&fs, Path::new("/"), "./util", Some(&importer));
    for _ in 0..3 {
        assert_eq!(resolve(&fs, Path::new("/"), "./util", Some(&importer)), first);
    }
}

#[test]
fn test_resolution_sees_file_system_changes() {
    let fs = MemoryFileSystem::with_files([("/src/util.ts", "")]);
    let importer = Url::parse("file:///src/index.ts").unwrap();
    let before = resolve(&fs, Path::new("/"), "./util", Some(&importer));
    assert_eq!(before.url().unwrap().path(), "/src/util.ts");

    fs.write_file(Path::new("/src/util.js"), b"").unwrap();
    let after = resolve(&fs, Path::new("/"), "./util", Some(&importer));
    assert_eq!(after.url().unwrap().path(), "/src/util.js");
}

#[test]
fn test_native_file_system_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::create_dir_all(root.join("src/lib")).unwrap();
    fs::write(root.join("src/index.ts"), "import { x } from './lib';\n").unwrap();
    fs::write(root.join("src/lib/index.ts"), "export const x: number = 1;\n").unwrap();
    fs::write(root.join("src/helper.ts"), "export {};\n").unwrap();

    let native = NativeFileSystem::new();
    let importer = file_url(&root.join("src/index.ts"));

    let lib = resolve(&native, &root, "./lib", Some(&importer));
    assert_eq!(lib, Resolution::Resolved(file_url(&root.join("src/lib/index.ts"))));

    let helper = resolve(&native, &root, "./helper.js", Some(&importer));
    assert_eq!(helper, Resolution::Resolved(file_url(&root.join("src/helper.ts"))));

    let entry = resolve(&native, &root, "./src/index", None);
    assert_eq!(entry, Resolution::Resolved(file_url(&root.join("src/index.ts"))));
}

#[test]
fn test_native_load() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::write(root.join("main.ts"), "enum Mode { On }\nexport const mode: Mode = Mode.On;\n").unwrap();

    let native = NativeFileSystem::new();
    let loader = LoadTransformer::new(&native, &StripTransform);
    let outcome = loader
        .load(&file_url(&root.join("main.ts")), &ExtensionConfig::defaults())
        .unwrap();
    let LoadOutcome::Loaded(result) = outcome else {
        panic!("main.ts should load");
    };
    assert!(result.code.contains(r#"Mode[Mode["On"] = 0] = "On""#), "{}", result.code);
    assert!(result.code.contains("export const mode ="), "{}", result.code);
    assert!(!result.code.contains(": Mode"), "{}", result.code);
}
