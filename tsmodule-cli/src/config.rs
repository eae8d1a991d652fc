//! CLI 配置
//!
//! CLI 特有的配置：分阶段日志级别。

use tracing_subscriber::filter::LevelFilter;
use tsmodule_config::Phase;

/// CLI 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub global: LevelFilter,
    pub config: Option<LevelFilter>,
    pub resolve: Option<LevelFilter>,
    pub load: Option<LevelFilter>,
    pub transform: Option<LevelFilter>,
    pub vfs: Option<LevelFilter>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: LevelFilter::WARN,
            config: None,
            resolve: None,
            load: None,
            transform: None,
            vfs: None,
        }
    }
}

impl LogConfig {
    pub fn with_global(global: LevelFilter) -> Self {
        Self {
            global,
            ..Self::default()
        }
    }

    /// Override the level of one phase
    pub fn set(&mut self, phase: Phase, level: LevelFilter) {
        let slot = match phase {
            Phase::Config => &mut self.config,
            Phase::Resolve => &mut self.resolve,
            Phase::Load => &mut self.load,
            Phase::Transform => &mut self.transform,
            Phase::Vfs => &mut self.vfs,
        };
        *slot = Some(level);
    }

    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> LevelFilter {
        let level = match phase {
            Phase::Config => self.config,
            Phase::Resolve => self.resolve,
            Phase::Load => self.load,
            Phase::Transform => self.transform,
            Phase::Vfs => self.vfs,
        };
        level.unwrap_or(self.global)
    }
}

/// Parse a level name; `silent` is an alias for `off`
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    match s.to_ascii_lowercase().as_str() {
        "silent" | "off" => Ok(LevelFilter::OFF),
        "error" => Ok(LevelFilter::ERROR),
        "warn" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        other => Err(format!("unknown log level '{other}'")),
    }
}

/// Parse `PHASE=LEVEL`, e.g. `resolve=trace`
pub fn parse_phase_level(s: &str) -> Result<(Phase, LevelFilter), String> {
    let (name, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PHASE=LEVEL, found '{s}'"))?;
    let phase = Phase::ALL
        .into_iter()
        .find(|p| p.as_str() == name.trim())
        .ok_or_else(|| format!("unknown phase '{}'", name.trim()))?;
    Ok((phase, parse_level(level.trim())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_falls_back_to_global() {
        let mut config = LogConfig::with_global(LevelFilter::INFO);
        config.set(Phase::Resolve, LevelFilter::TRACE);
        assert_eq!(config.level_for(Phase::Resolve), LevelFilter::TRACE);
        assert_eq!(config.level_for(Phase::Load), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Ok(LevelFilter::DEBUG));
        assert_eq!(parse_level("silent"), Ok(LevelFilter::OFF));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_parse_phase_level() {
        assert_eq!(
            parse_phase_level("vfs=trace"),
            Ok((Phase::Vfs, LevelFilter::TRACE))
        );
        assert!(parse_phase_level("vfs").is_err());
        assert!(parse_phase_level("lexer=info").is_err());
    }
}
