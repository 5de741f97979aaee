//! Site routes.
//!
//! The site uses hash routing, so every page URL has the form
//! `{origin}/#/{path}`. Loaders return a [`Route`] when the outcome of a
//! fetch is "go somewhere else" rather than "render this".

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Store,
    BlogList,
    BlogPost { slug: String, preview: bool },
    Services,
    Contact,
    Resume,
    Admin,
    Terms,
    Privacy,
}

impl Route {
    /// Path inside the hash fragment, including any query string.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Store => "/store".to_string(),
            Route::BlogList => "/blog".to_string(),
            Route::BlogPost { slug, preview } => {
                if *preview {
                    format!("/blog/{slug}?preview=1")
                } else {
                    format!("/blog/{slug}")
                }
            }
            Route::Services => "/services".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Resume => "/resume".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::Terms => "/terms".to_string(),
            Route::Privacy => "/privacy".to_string(),
        }
    }

    /// Absolute URL under the given site origin.
    pub fn url(&self, site_origin: &str) -> String {
        format!("{}/#{}", site_origin.trim_end_matches('/'), self.path())
    }

    /// Parse a fragment path such as `/blog/my-post?preview=1`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_start_matches('#');
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let preview = query
            .map(|q| q.split('&').any(|pair| pair == "preview=1"))
            .unwrap_or(false);

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["store"] => Some(Route::Store),
            ["blog"] => Some(Route::BlogList),
            ["blog", slug] => Some(Route::BlogPost {
                slug: (*slug).to_string(),
                preview,
            }),
            ["services"] => Some(Route::Services),
            ["contact"] => Some(Route::Contact),
            ["resume"] => Some(Route::Resume),
            ["admin"] => Some(Route::Admin),
            ["terms"] => Some(Route::Terms),
            ["privacy"] => Some(Route::Privacy),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_url_uses_hash_routing() {
        let route = Route::BlogPost {
            slug: "my-post".into(),
            preview: true,
        };
        assert_eq!(
            route.url("https://example.dev/"),
            "https://example.dev/#/blog/my-post?preview=1"
        );
    }

    #[test]
    fn parse_round_trips_paths() {
        for route in [
            Route::Home,
            Route::BlogList,
            Route::BlogPost { slug: "a".into(), preview: false },
            Route::BlogPost { slug: "b".into(), preview: true },
            Route::Admin,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert_eq!(Route::parse("/blog/a/b"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }
}
