//! Hypermedia listing envelope for paged collections.
//!
//! Produces the `{data, total, count, page, limit, links}` shape with
//! first/prev/current/next/last page links.

use serde::Serialize;

/// A hypermedia link.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type")]
    pub method: String,
}

/// One listed object with its own links.
#[derive(Debug, Serialize)]
pub struct Entry<T: Serialize> {
    pub object: T,
    pub links: Vec<Link>,
}

/// A page of a collection.
#[derive(Debug, Serialize)]
pub struct Listing<T: Serialize> {
    pub data: Vec<Entry<T>>,
    pub total: u64,
    pub count: u8,
    pub page: u64,
    pub limit: u8,
    pub links: Vec<Link>,
}

impl<T: Serialize> Listing<T> {
    /// Assemble a listing page with its hypermedia links.
    pub fn new(base_path: &str, page: u64, total: u64, limit: u8, entries: Vec<Entry<T>>) -> Self {
        let page = page.max(1);
        let count = entries.len() as u8;
        let links = hypermedia_links(base_path, page, total, limit);
        Self {
            data: entries,
            total,
            count,
            page,
            limit,
            links,
        }
    }
}

/// Link to one page of a collection.
pub fn page_link(base_path: &str, count: u8, page: u64, rel: &str, method: &str) -> Link {
    Link {
        href: format!("{base_path}?page={page}&count={count}"),
        rel: rel.to_string(),
        method: method.to_string(),
    }
}

/// Total pages for `total` records at `count` per page; never less than one.
fn pages(count: u8, total: u64) -> u64 {
    if total < 1 || count < 1 {
        return 1;
    }
    total.div_ceil(u64::from(count))
}

/// Navigation links for one page: first and last always, prev and next only
/// where they exist.
pub fn hypermedia_links(base_path: &str, page: u64, total: u64, count: u8) -> Vec<Link> {
    let page = page.max(1);
    let pages = pages(count, total);
    let mut links = vec![page_link(base_path, count, 1, "first", "GET")];
    if page > 1 {
        links.push(page_link(base_path, count, page - 1, "prev", "GET"));
    }
    links.push(page_link(base_path, count, page, "current", "GET"));
    if page < pages {
        links.push(page_link(base_path, count, page + 1, "next", "GET"));
    }
    links.push(page_link(base_path, count, pages, "last", "GET"));
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_math() {
        assert_eq!(pages(1, 100), 100);
        assert_eq!(pages(2, 50), 25);
        assert_eq!(pages(3, 13), 5);
        assert_eq!(pages(10, 97), 10);
        assert_eq!(pages(7, 100), 15);
    }

    #[test]
    fn pages_never_less_than_one() {
        assert_eq!(pages(0, 100), 1);
        assert_eq!(pages(50, 0), 1);
        assert_eq!(pages(0, 0), 1);
    }

    #[test]
    fn page_link_outputs_expected() {
        let expected = Link {
            href: "/products?page=1&count=50".to_string(),
            rel: "something".to_string(),
            method: "GET".to_string(),
        };
        assert_eq!(page_link("/products", 50, 1, "something", "GET"), expected);
    }

    #[test]
    fn first_page_has_no_prev() {
        let links = hypermedia_links("/products", 1, 100, 10);
        let rels: Vec<&str> = links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, ["first", "current", "next", "last"]);
        assert_eq!(links[2].href, "/products?page=2&count=10");
        assert_eq!(links[3].href, "/products?page=10&count=10");
    }

    #[test]
    fn middle_page_has_prev_and_next() {
        let links = hypermedia_links("/products", 5, 100, 10);
        let rels: Vec<&str> = links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, ["first", "prev", "current", "next", "last"]);
        assert_eq!(links[1].href, "/products?page=4&count=10");
        assert_eq!(links[3].href, "/products?page=6&count=10");
    }

    #[test]
    fn last_page_has_no_next() {
        let links = hypermedia_links("/products", 10, 100, 10);
        let rels: Vec<&str> = links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, ["first", "prev", "current", "last"]);
    }

    #[test]
    fn listing_counts_its_entries() {
        let entries: Vec<Entry<u32>> = vec![
            Entry {
                object: 1,
                links: Vec::new(),
            },
            Entry {
                object: 2,
                links: Vec::new(),
            },
        ];
        let listing = Listing::new("/products", 0, 12, 10, entries);
        assert_eq!(listing.page, 1);
        assert_eq!(listing.count, 2);
        assert_eq!(listing.total, 12);
        assert_eq!(listing.limit, 10);
    }
}
