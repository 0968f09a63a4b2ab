use serde::Serialize;

/// Whether the backing cache store is currently usable.
///
/// `Degraded` means the last store call failed; reads behave as misses and
/// writes are dropped until a call succeeds again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Ready,
    Degraded,
}

impl CacheStatus {
    pub fn is_ready(self) -> bool {
        self == CacheStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CacheStatus::Degraded).unwrap(),
            "\"degraded\""
        );
        assert_eq!(
            serde_json::to_string(&CacheStatus::Ready).unwrap(),
            "\"ready\""
        );
    }
}
