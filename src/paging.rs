use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::fmt;

use crate::blocks::Block;
use crate::error::{Result, ValenceError};
use crate::valence::Valence;

/// Every API route starts with this prefix
pub const API_PATH_MARKER: &str = "/d2l/api/";

/// A block returned by an endpoint that pages its results.
pub trait PagedBlock: Block {
    /// Key of the item array in a page
    const ITEMS_KEY: &'static str;

    /// Key of the continuation URL in a page
    const NEXT_PAGE_KEY: &'static str = "NextPageUrl";
}

/// Lazy, forward-only sequence over a paged endpoint.
///
/// Holds the decoded items of the current page and the route of the next
/// one. When the buffer runs dry the next page is fetched through the
/// session; the sequence ends once a page without continuation is consumed.
/// A continuation URL that is not an API route is reported after the items
/// of its page have been handed out.
pub struct PagedBlocks<T> {
    valence: Valence,
    items: VecDeque<T>,
    next_route: Option<String>,
    broken_link: Option<ValenceError>,
}

impl<T: PagedBlock> PagedBlocks<T> {
    /// Start from an already fetched first page
    pub fn new(valence: Valence, first_page: Value) -> Self {
        let mut paged = PagedBlocks {
            valence,
            items: VecDeque::new(),
            next_route: None,
            broken_link: None,
        };
        paged.build(first_page);
        paged
    }

    /// Replace the buffer with the items of `page` and record its continuation
    pub fn build(&mut self, page: Value) {
        let mut page = match page {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let items = page.remove(T::ITEMS_KEY).unwrap_or(Value::Null);
        self.items = T::many(items).into();

        self.next_route = None;
        if let Some(Value::String(url)) = page.remove(T::NEXT_PAGE_KEY) {
            if !url.is_empty() {
                match next_page_route(&url) {
                    Ok(route) => self.next_route = Some(route),
                    Err(e) => self.broken_link = Some(e),
                }
            }
        }
    }

    /// Route of the next page, `None` once the last page is buffered
    pub fn next_route(&self) -> Option<&str> {
        self.next_route.as_deref()
    }

    /// Items left in the current page
    pub fn buffered(&self) -> usize {
        self.items.len()
    }
}

impl<T> fmt::Debug for PagedBlocks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedBlocks")
            .field("next_route", &self.next_route)
            .field("buffered", &self.items.len())
            .field("broken_link", &self.broken_link)
            .finish()
    }
}

impl<T: PagedBlock> Iterator for PagedBlocks<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.items.pop_front() {
                return Some(Ok(item));
            }
            if let Some(e) = self.broken_link.take() {
                return Some(Err(e));
            }

            // an empty page is not the end while a continuation exists
            let route = self.next_route.take()?;
            match self.valence.request_json(&route, reqwest::Method::GET, None) {
                Ok(Some(page)) => self.build(page),
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Trim a continuation URL down to its API route
pub fn next_page_route(url: &str) -> Result<String> {
    url.find(API_PATH_MARKER)
        .map(|start| url[start..].to_string())
        .ok_or_else(|| ValenceError::Pagination(url.to_string()))
}
