//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。

use serde::Serialize;
use thiserror::Error;
use tsmodule_config::{ConfigError, Phase};
use tsmodule_core::LoadError;

/// Hook 错误类型
///
/// 只有两类失败：配置失败与加载失败。找不到、不归我们处理的请求都不是错误。
#[derive(Error, Debug)]
pub enum HookError {
    /// 配置文件读取或解析失败
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 读取或转换模块失败
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl HookError {
    /// 获取错误阶段
    pub fn phase(&self) -> Phase {
        match self {
            HookError::Config(_) => Phase::Config,
            HookError::Load(LoadError::Transform(_)) => Phase::Transform,
            HookError::Load(_) => Phase::Load,
        }
    }

    /// 出错的文件（如果有）
    pub fn location(&self) -> Option<&str> {
        match self {
            HookError::Config(ConfigError::Read { path, .. })
            | HookError::Config(ConfigError::Parse { path, .. }) => Some(path.as_str()),
            HookError::Config(ConfigError::Shape(_)) => None,
            HookError::Load(LoadError::Read { path, .. })
            | HookError::Load(LoadError::Decode { path, .. }) => Some(path.as_str()),
            HookError::Load(LoadError::Transform(e)) => Some(e.sourcefile.as_str()),
        }
    }

    /// 获取错误行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            HookError::Load(e) => e.position().map(|(line, _)| line),
            _ => None,
        }
    }

    /// 获取错误列号（如果有）
    pub fn column(&self) -> Option<usize> {
        match self {
            HookError::Load(e) => e.position().map(|(_, column)| column),
            _ => None,
        }
    }

    /// 转换为结构化错误报告
    ///
    /// CLI 可以直接打印，上层应用可以序列化为 JSON。
    pub fn to_report(&self) -> ErrorReport {
        let message = match self {
            // 位置已经单独给出
            HookError::Load(LoadError::Transform(e)) => e.kind.to_string(),
            other => other.to_string(),
        };
        ErrorReport {
            phase: self.phase().as_str(),
            message,
            location: self.location().map(str::to_string),
            line: self.line(),
            column: self.column(),
        }
    }
}

/// 结构化错误报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: config, load, transform
    pub phase: &'static str,
    /// 人类可读的错误消息
    pub message: String,
    /// 出错的文件
    pub location: Option<String>,
    /// 错误行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误列号（1-based，如果有）
    pub column: Option<usize>,
}

impl std::fmt::Display for ErrorReport {
    /// 默认的 CLI 友好格式
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.location, self.line, self.column) {
            (Some(location), Some(line), Some(col)) => write!(
                f,
                "[{}:{}:{}] {} error: {}",
                location, line, col, self.phase, self.message
            ),
            (Some(location), _, _) => {
                write!(f, "[{}] {} error: {}", location, self.phase, self.message)
            }
            _ => write!(f, "{} error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 简洁格式（适合终端）
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsmodule_core::{TransformError, TransformErrorKind};

    fn transform_error() -> HookError {
        HookError::Load(LoadError::Transform(TransformError {
            kind: TransformErrorKind::Syntax("Unterminated string constant".to_string()),
            sourcefile: "/src/bad.ts".to_string(),
            line: 3,
            column: 7,
        }))
    }

    #[test]
    fn test_transform_error_report() {
        let err = transform_error();
        assert_eq!(err.phase(), Phase::Transform);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.column(), Some(7));

        let report = err.to_report();
        assert_eq!(report.location.as_deref(), Some("/src/bad.ts"));
        assert_eq!(report.message, "Unterminated string constant");
        assert_eq!(
            report.to_string(),
            "[/src/bad.ts:3:7] transform error: Unterminated string constant"
        );
    }

    #[test]
    fn test_config_error_report() {
        let err = HookError::from(ConfigError::Parse {
            path: "/app/tsmodule.config.json".to_string(),
            message: "expected value".to_string(),
        });
        assert_eq!(err.phase(), Phase::Config);
        assert_eq!(err.line(), None);

        let report = err.to_report();
        assert_eq!(report.phase, "config");
        assert_eq!(report.location.as_deref(), Some("/app/tsmodule.config.json"));
        assert!(report.to_string().starts_with("[/app/tsmodule.config.json] config error:"));

        let shape = HookError::from(ConfigError::Shape("bad".to_string())).to_report();
        assert_eq!(shape.to_string(), "config error: Invalid configuration: bad");
        assert_eq!(shape.to_short(), "config: Invalid configuration: bad");
    }

    #[test]
    fn test_report_json() {
        let json = transform_error().to_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "transform");
        assert_eq!(value["line"], 3);
        assert_eq!(value["column"], 7);
        assert_eq!(value["location"], "/src/bad.ts");
    }
}
