//! Pagination Parameters
//!
//! Common limit/offset query parameters for list endpoints.

use serde::Deserialize;

/// デフォルトの1ページあたりの件数
pub const DEFAULT_LIMIT: i64 = 20;

/// 1ページあたりの件数の上限
pub const MAX_LIMIT: i64 = 100;

/// limit/offset ページネーションパラメータ
///
/// クエリ文字列から取り出し、[`Pagination::clamped`] で上限に丸めてから
/// リポジトリに渡します。
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// limit を `1..=MAX_LIMIT` に、offset を `0..` に丸める
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_LIMIT),
            offset: self.offset.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let p = Pagination::default();
        assert_eq!(p.limit, DEFAULT_LIMIT);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_clamped() {
        let p = Pagination {
            limit: 10_000,
            offset: -5,
        }
        .clamped();
        assert_eq!(p.limit, MAX_LIMIT);
        assert_eq!(p.offset, 0);

        let p = Pagination {
            limit: 0,
            offset: 3,
        }
        .clamped();
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset, 3);
    }

    #[test]
    fn test_deserialize_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.limit, DEFAULT_LIMIT);
        assert_eq!(p.offset, 0);

        let p: Pagination = serde_json::from_str(r#"{"limit": 5, "offset": 40}"#).unwrap();
        assert_eq!(p.limit, 5);
        assert_eq!(p.offset, 40);
    }
}
