//! Page-name helpers for the static site layout. Pages live at the root,
//! except for the `services/` and `blogs/` subdirectories.

fn in_subdirectory(path: &str) -> Option<&'static str> {
    let path = path.to_lowercase();
    if path.contains("/blogs/") {
        Some("blogs")
    } else if path.contains("/services/") {
        Some("services")
    } else {
        None
    }
}

/// Prefix that turns a root-relative page name into a link from `path`.
pub fn resolve_base_path(path: &str) -> &'static str {
    match in_subdirectory(path) {
        Some(_) => "../",
        None => "",
    }
}

/// Last path segment of a link, lowercased, without query or fragment.
pub fn normalize_page_from_href(href: &str) -> String {
    let cleaned = href.split('#').next().unwrap_or_default();
    let cleaned = cleaned.split('?').next().unwrap_or_default();
    cleaned
        .split('/')
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or_default()
        .to_lowercase()
}

/// The nav entry a page belongs to. Blog posts highlight the blog index,
/// service pages highlight home.
pub fn current_page_name(path: &str) -> String {
    match in_subdirectory(path) {
        Some("blogs") => return "blogs.html".to_string(),
        Some(_) => return "index.html".to_string(),
        None => {}
    }
    let current = path
        .split('/')
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or("index.html")
        .to_lowercase();
    if current.ends_with(".html") {
        current
    } else {
        "index.html".to_string()
    }
}
