//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数：内存和真实文件系统上的项目夹具

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tsmodule_workspace::{Environment, MemoryFileSystem, ModuleHooks, NativeFileSystem, Url};

/// 在临时目录里创建项目文件；返回目录守卫和规范化后的根路径
pub fn native_project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }
    (dir, root)
}

/// 根目录为 `root` 的真实文件系统 hooks
pub fn native_hooks(root: &Path) -> ModuleHooks {
    ModuleHooks::new(Environment::new(root)).with_vfs(Arc::new(NativeFileSystem::new()))
}

/// 内存文件系统 hooks，工作目录为 `/app`
pub fn memory_hooks(files: &[(&str, &str)]) -> ModuleHooks {
    let fs = MemoryFileSystem::with_files(files.iter().copied());
    ModuleHooks::new(Environment::new("/app")).with_vfs(Arc::new(fs))
}

pub fn file_url(path: &Path) -> Url {
    Url::from_file_path(path).unwrap()
}
