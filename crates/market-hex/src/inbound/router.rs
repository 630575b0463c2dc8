use std::fmt;

/// Screens reachable by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Advertisements,
    Advertisement(String),
    Orders,
    NotFound(String),
}

impl Route {
    /// Maps a path to its screen. `/` lands on the advertisement list;
    /// query strings and trailing slashes are ignored.
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim();
        let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = without_query
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["advertisements"] => Route::Advertisements,
            ["advertisements", id] => Route::Advertisement((*id).to_string()),
            ["orders"] => Route::Orders,
            _ => {
                tracing::debug!(path = trimmed, "no route matched");
                Route::NotFound(trimmed.to_string())
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Advertisements => "/advertisements".into(),
            Route::Advertisement(id) => format!("/advertisements/{id}"),
            Route::Orders => "/orders".into(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
