//! Cursor walking for paginated collection endpoints.
//!
//! A collection is requested page by page. The first request carries no
//! cursor; every later request carries the cursor returned by the previous
//! page. The walk ends on the first page whose cursor is absent or empty.

use crate::error::CoreError;
use crate::types::Page;
use std::future::Future;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Upper bound on pages per collection. `None` walks until the server
    /// stops returning a cursor, however long that takes.
    pub max_pages: Option<usize>,
}

impl PaginationOptions {
    pub fn unbounded() -> Self {
        Self { max_pages: None }
    }

    pub fn with_max_pages(max_pages: usize) -> Self {
        Self {
            max_pages: Some(max_pages),
        }
    }
}

/// Collects every item of a paginated collection, in server order.
///
/// `fetch_page` receives the cursor for the page to fetch (`None` for the
/// first page). The first failing page aborts the walk and items gathered so
/// far are dropped.
pub async fn fetch_all<T, F, Fut>(
    endpoint: &str,
    options: PaginationOptions,
    mut fetch_page: F,
) -> Result<Vec<T>, CoreError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, CoreError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        if let Some(max_pages) = options.max_pages {
            if pages >= max_pages {
                return Err(CoreError::PaginationLimit {
                    endpoint: endpoint.to_string(),
                    max_pages,
                });
            }
        }

        let page = fetch_page(cursor.take()).await?;
        pages += 1;

        let next = page.next_cursor().map(str::to_owned);
        debug!(
            "{}: page {} returned {} items, more: {}",
            endpoint,
            pages,
            page.items.len(),
            next.is_some()
        );
        items.extend(page.items);

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlueskyApiError;

    /// Serves `data` in pages of `page_size`, using the start offset as cursor.
    fn paged(data: &[u32], page_size: usize, cursor: Option<String>) -> Page<u32> {
        let start = cursor.map(|c| c.parse::<usize>().unwrap()).unwrap_or(0);
        let end = (start + page_size).min(data.len());
        let next = if end < data.len() {
            Some(end.to_string())
        } else {
            None
        };
        Page::new(data[start..end].to_vec(), next)
    }

    #[tokio::test]
    async fn test_returns_every_item_for_all_page_sizes() {
        for len in [0usize, 1, 2, 7, 10] {
            let data: Vec<u32> = (0..len as u32).collect();
            for page_size in 1..=len + 1 {
                let result = fetch_all("test", PaginationOptions::default(), |cursor| {
                    let page = paged(&data, page_size, cursor);
                    async move { Ok(page) }
                })
                .await
                .unwrap();
                assert_eq!(result, data, "len {} page size {}", len, page_size);
            }
        }
    }

    #[tokio::test]
    async fn test_first_request_has_no_cursor_and_cursors_are_forwarded() {
        let mut seen = Vec::new();
        let result = fetch_all("test", PaginationOptions::default(), |cursor| {
            seen.push(cursor.clone());
            let page = match cursor.as_deref() {
                None => Page::new(vec!["a", "b"], Some("c1".to_string())),
                Some("c1") => Page::new(vec!["c"], Some("c2".to_string())),
                Some("c2") => Page::last(vec!["d"]),
                Some(other) => panic!("unexpected cursor {}", other),
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(result, vec!["a", "b", "c", "d"]);
        assert_eq!(
            seen,
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_cursor_terminates() {
        let mut calls = 0;
        let result = fetch_all("test", PaginationOptions::default(), |_| {
            calls += 1;
            async move { Ok(Page::new(vec![1, 1], Some(String::new()))) }
        })
        .await
        .unwrap();

        assert_eq!(result, vec![1, 1]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_items_are_not_deduplicated() {
        let result = fetch_all("test", PaginationOptions::default(), |cursor| {
            let page = match cursor {
                None => Page::new(vec![3, 1, 3], Some("next".to_string())),
                Some(_) => Page::last(vec![1, 3]),
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(result, vec![3, 1, 3, 1, 3]);
    }

    #[tokio::test]
    async fn test_keeps_requesting_while_cursor_is_present() {
        const PROBE_LIMIT: u32 = 1_000;
        let mut calls = 0u32;
        let result: Result<Vec<u32>, CoreError> =
            fetch_all("endless", PaginationOptions::unbounded(), |_| {
                calls += 1;
                let n = calls;
                async move {
                    if n >= PROBE_LIMIT {
                        Err(CoreError::InvalidInput {
                            message: "probe limit reached".to_string(),
                        })
                    } else {
                        Ok(Page::new(vec![n], Some("again".to_string())))
                    }
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls, PROBE_LIMIT);
    }

    #[tokio::test]
    async fn test_max_pages_cap() {
        let mut calls = 0;
        let result: Result<Vec<u32>, CoreError> =
            fetch_all("endless", PaginationOptions::with_max_pages(5), |_| {
                calls += 1;
                async move { Ok(Page::new(vec![0], Some("again".to_string()))) }
            })
            .await;

        match result {
            Err(CoreError::PaginationLimit {
                endpoint,
                max_pages,
            }) => {
                assert_eq!(endpoint, "endless");
                assert_eq!(max_pages, 5);
            }
            other => panic!("Expected PaginationLimit, got {:?}", other),
        }
        assert_eq!(calls, 5);
    }

    #[tokio::test]
    async fn test_cap_not_hit_when_last_page_fits() {
        let data: Vec<u32> = (0..6).collect();
        let result = fetch_all("test", PaginationOptions::with_max_pages(3), |cursor| {
            let page = paged(&data, 2, cursor);
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(result, data);
    }

    #[test]
    fn test_failed_page_discards_accumulated_items() {
        let result: Result<Vec<u32>, CoreError> =
            tokio_test::block_on(fetch_all("test", PaginationOptions::default(), |cursor| {
                let outcome = match cursor {
                    None => Ok(Page::new(vec![1, 2, 3], Some("p2".to_string()))),
                    Some(_) => Err(CoreError::BlueskyApi(BlueskyApiError::ServerError {
                        status_code: 502,
                    })),
                };
                async move { outcome }
            }));

        assert!(matches!(
            result,
            Err(CoreError::BlueskyApi(BlueskyApiError::ServerError {
                status_code: 502
            }))
        ));
    }
}
