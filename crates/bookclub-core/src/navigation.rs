//! Application shell: sidebar entries and breadcrumbs derived from a route.

use crate::core::services::types::Resource;
use crate::utils::text::to_title_case;

/// Prefix of every application route.
pub const APP_BASE: &str = "/app";
pub const SIDEBAR_GROUP: &str = "Better Reads";

/// Path segments after `base`, with empty segments dropped.
pub fn route_segments(path: &str, base: &str) -> Vec<String> {
    path.replacen(base, "", 1)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub title: String,
    pub path: String,
    pub is_active: bool,
}

/// Trail for `path` under [`APP_BASE`]; the last crumb is the current page.
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let segments = route_segments(path, APP_BASE);
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| Breadcrumb {
            title: to_title_case(segment),
            path: format!("{}/{}", APP_BASE, segments[..=index].join("/")),
            is_active: index == last,
        })
        .collect()
}

/// Breadcrumb titles joined for single-line display.
pub fn breadcrumb_line(path: &str) -> String {
    breadcrumbs(path)
        .iter()
        .map(|crumb| crumb.title.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub title: &'static str,
    pub url: String,
    pub resource: Option<Resource>,
}

impl SidebarItem {
    fn new(title: &'static str, href: &str, resource: Option<Resource>) -> Self {
        Self {
            title,
            url: format!("{}{}", APP_BASE, href),
            resource,
        }
    }

    pub fn is_active(&self, path: &str) -> bool {
        match self.resource {
            Some(_) => path == self.url || path.starts_with(&format!("{}/", self.url)),
            None => path == self.url || path == APP_BASE,
        }
    }
}

pub fn sidebar_items() -> Vec<SidebarItem> {
    vec![
        SidebarItem::new("Dashboard", "/", None),
        SidebarItem::new("Authors", "/authors", Some(Resource::Authors)),
        SidebarItem::new("Books", "/books", Some(Resource::Books)),
        SidebarItem::new("Genres", "/genres", Some(Resource::Genres)),
    ]
}

pub fn resource_route(resource: Resource) -> String {
    format!("{}/{}", APP_BASE, resource.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_segments() {
        assert_eq!(route_segments("/app/books/12/edit", "/app"), vec!["books", "12", "edit"]);
        assert!(route_segments("/app", "/app").is_empty());
        assert_eq!(route_segments("/app//books/", "/app"), vec!["books"]);
    }

    #[test]
    fn test_breadcrumbs() {
        let crumbs = breadcrumbs("/app/books/12/edit");
        assert_eq!(crumbs.len(), 3);
        assert_eq!(
            crumbs[0],
            Breadcrumb {
                title: "Books".to_string(),
                path: "/app/books".to_string(),
                is_active: false,
            }
        );
        assert_eq!(crumbs[1].path, "/app/books/12");
        assert_eq!(crumbs[2].title, "Edit");
        assert!(crumbs[2].is_active);
        assert_eq!(breadcrumb_line("/app/books/12/edit"), "Books > 12 > Edit");
    }

    #[test]
    fn test_breadcrumbs_root_is_empty() {
        assert!(breadcrumbs("/app").is_empty());
        assert_eq!(breadcrumb_line("/app/"), "");
    }

    #[test]
    fn test_sidebar_items() {
        let items = sidebar_items();
        let urls: Vec<&str> = items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["/app/", "/app/authors", "/app/books", "/app/genres"]);
        assert!(items[2].is_active("/app/books/3/edit"));
        assert!(!items[2].is_active("/app/bookshelf"));
        assert!(items[0].is_active("/app"));
        assert_eq!(resource_route(Resource::Books), items[2].url);
    }
}
