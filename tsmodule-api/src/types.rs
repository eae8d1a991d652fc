//! API 类型定义
//!
//! 旧式两步加载的输入类型。

use tsmodule_config::OutputKind;
use url::Url;

/// `transform_source` 的上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    /// 模块地址
    pub url: Url,
    /// 宿主确定的输出类型
    pub format: OutputKind,
}

impl SourceContext {
    pub fn new(url: Url, format: OutputKind) -> Self {
        Self { url, format }
    }
}
