//! Paged list responses with HATEOAS links

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `?page=&page_size=` query parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: &'static str,
    pub href: String,
    pub method: &'static str,
}

/// One page of a collection
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub links: Vec<Link>,
}

impl<T> Page<T> {
    /// Slice `all` to the requested page. `path` is the collection path the
    /// links point back to.
    pub fn paginate(all: Vec<T>, query: &PageQuery, path: &str) -> Self {
        let total_count = all.len();
        let items = all
            .into_iter()
            .skip(query.page.saturating_sub(1).saturating_mul(query.page_size))
            .take(query.page_size)
            .collect();

        Self {
            items,
            total_count,
            page: query.page,
            page_size: query.page_size,
            links: page_links(path, query.page, query.page_size, total_count),
        }
    }
}

/// `self` always, `prev` past the first page, `next` before the last one
pub fn page_links(path: &str, page: usize, page_size: usize, total_count: usize) -> Vec<Link> {
    let href = |p: usize| format!("{}?page={}&page_size={}", path, p, page_size);
    let total_pages = total_count.div_ceil(page_size.max(1));

    let mut links = vec![Link {
        rel: "self",
        href: href(page),
        method: "GET",
    }];
    if page > 1 {
        links.push(Link {
            rel: "prev",
            href: href(page - 1),
            method: "GET",
        });
    }
    if page < total_pages {
        links.push(Link {
            rel: "next",
            href: href(page + 1),
            method: "GET",
        });
    }
    links
}
