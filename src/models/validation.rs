use thiserror::Error;

/// 验证错误类型
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Import range start must be at least 1 (got {0})")]
    RangeStartTooSmall(i64),

    #[error("Import range is reversed: from {from} is greater than to {to}")]
    RangeReversed { from: i64, to: i64 },

    #[error("Import range is too large: {len} ids requested (max {max})")]
    RangeTooLarge { len: i64, max: u32 },

    #[error("Page must be at least 1")]
    InvalidPage,

    #[error("TMDB id must be at least 1 (got {0})")]
    InvalidTmdbId(i64),
}

/// 经过验证的闭区间导入范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportRange {
    from: i64,
    to: i64,
}

impl ImportRange {
    pub fn new(from: i64, to: i64, max_len: u32) -> Result<Self, ValidationError> {
        if from < 1 {
            return Err(ValidationError::RangeStartTooSmall(from));
        }
        if from > to {
            return Err(ValidationError::RangeReversed { from, to });
        }
        let len = to - from + 1;
        if len > i64::from(max_len) {
            return Err(ValidationError::RangeTooLarge { len, max: max_len });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    pub fn len(&self) -> usize {
        (self.to - self.from + 1) as usize
    }

    pub fn ids(&self) -> std::ops::RangeInclusive<i64> {
        self.from..=self.to
    }
}

/// 分页参数：limit 默认 20，限制在 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

pub fn validate_page(page: u32) -> Result<u32, ValidationError> {
    if page == 0 {
        return Err(ValidationError::InvalidPage);
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_range() {
        let range = ImportRange::new(550, 555, 50).expect("Should accept range");
        assert_eq!(range.len(), 6);
        assert_eq!(range.ids().collect::<Vec<_>>(), vec![550, 551, 552, 553, 554, 555]);
    }

    #[test]
    fn test_single_id_range() {
        let range = ImportRange::new(7, 7, 1).expect("Should accept single id");
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(ImportRange::new(0, 5, 50), Err(ValidationError::RangeStartTooSmall(0)));
        assert_eq!(
            ImportRange::new(10, 5, 50),
            Err(ValidationError::RangeReversed { from: 10, to: 5 })
        );
        assert_eq!(
            ImportRange::new(1, 51, 50),
            Err(ValidationError::RangeTooLarge { len: 51, max: 50 })
        );
    }

    #[test]
    fn test_pagination_defaults_and_clamp() {
        assert_eq!(Pagination::new(None, None), Pagination { limit: 20, offset: 0 });
        assert_eq!(Pagination::new(Some(0), Some(-5)), Pagination { limit: 1, offset: 0 });
        assert_eq!(Pagination::new(Some(1000), Some(40)), Pagination { limit: 100, offset: 40 });
    }

    #[test]
    fn test_validate_page() {
        assert_eq!(validate_page(0), Err(ValidationError::InvalidPage));
        assert_eq!(validate_page(3), Ok(3));
    }

    proptest! {
        #[test]
        fn prop_range_accepts_exactly_valid_bounds(from in -10i64..1000, len in 0i64..120, max in 1u32..100) {
            let to = from + len - 1;
            let result = ImportRange::new(from, to, max);
            let valid = from >= 1 && len >= 1 && len <= i64::from(max);
            prop_assert_eq!(result.is_ok(), valid);
            if let Ok(range) = result {
                prop_assert_eq!(range.len() as i64, len);
                prop_assert_eq!(range.ids().count() as i64, len);
            }
        }
    }
}
