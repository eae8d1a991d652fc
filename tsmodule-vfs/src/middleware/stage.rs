//! Middleware execution stage

/// Execution stage for middleware
///
/// Stages are ordered by priority. Lower numbers execute first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    /// Outer layer: tracing, monitoring
    #[default]
    Outer = 100,
    /// Pre-processing: permission checks, validation
    PreProcess = 200,
}

impl Stage {
    /// Get stage priority (lower = earlier)
    pub fn priority(&self) -> u32 {
        *self as u32
    }
}
