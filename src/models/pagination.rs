//! 分页参数与分页元数据

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// 查询参数 `?page=&limit=`
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// 归一化后的 (page, limit)
    pub fn resolve(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (page, limit)
    }

    /// SQL OFFSET
    pub fn offset(&self) -> i64 {
        let (page, limit) = self.resolve();
        (page - 1).saturating_mul(limit)
    }
}

/// 分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginate {
    pub total: i64,
    pub limit: i64,
    pub page: i64,
    pub pages: i64,
}

impl Paginate {
    pub fn new(total: i64, query: &PageQuery) -> Self {
        let (page, limit) = query.resolve();
        let pages = if total <= 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            total,
            limit,
            page,
            pages,
        }
    }
}
