//! Generic paginator.

use error::{AppError, PaginationMeta, Result};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QuerySelect, Select};

use super::ListParams;

/// Page number and size of a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page:      u64,
    pub page_size: u64,
}

fn parse_positive(name: &str, raw: Option<&str>, default: u64) -> Result<u64> {
    let Some(raw) = raw
    else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(AppError::validation(format!("{} must be a positive integer", name))),
    }
}

impl PageRequest {
    /// Read `page` (default 1) and `pageSize` (default `default_size`).
    ///
    /// Non-numeric or zero values are rejected; there is no upper bound on the
    /// page size.
    pub fn from_params(params: &ListParams, default_size: u64) -> Result<Self> {
        Ok(Self {
            page:      parse_positive("page", params.get("page"), 1)?,
            page_size: parse_positive("pageSize", params.get("pageSize"), default_size)?,
        })
    }
}

/// Count the rows matched by `select`, then fetch the requested window.
///
/// `select` must already carry its filter and ordering.
pub async fn paginate<E, C>(db: &C, select: Select<E>, request: PageRequest) -> Result<(Vec<E::Model>, PaginationMeta)>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let total_count = select.clone().count(db).await?;
    let meta = PaginationMeta::new(request.page, request.page_size, total_count);

    let Some(offset) = meta.offset()
    else {
        return Err(AppError::validation("page is out of range"));
    };
    if offset >= total_count {
        return Ok((Vec::new(), meta));
    }

    let items = select
        .offset(offset)
        .limit(meta.limit())
        .all(db)
        .await?;

    Ok((items, meta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::from_params(&ListParams::default(), 9).unwrap();
        assert_eq!(
            request,
            PageRequest {
                page:      1,
                page_size: 9,
            }
        );
    }

    #[test]
    fn test_explicit_values() {
        let request = PageRequest::from_params(&ListParams::from([("page", "3"), ("pageSize", "250")]), 10).unwrap();
        assert_eq!(request.page, 3);
        assert_eq!(request.page_size, 250);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for (key, value) in [("page", "0"), ("page", "abc"), ("pageSize", "-5"), ("pageSize", "1.5")] {
            let err = PageRequest::from_params(&ListParams::from([(key, value)]), 10).unwrap_err();
            assert_eq!(err.code(), "VALIDATION_ERROR", "{key}={value}");
        }
    }
}
