use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::errors::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteName {
    Vote,
    Edit,
    Admin,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Vote => "vote",
            RouteName::Edit => "edit",
            RouteName::Admin => "admin",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path pattern bound to a route. `:name` segments capture one path segment.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub name: RouteName,
    pub pattern: &'static str,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        name: RouteName::Vote,
        pattern: "/",
    },
    RouteDef {
        name: RouteName::Edit,
        pattern: "/edit/:id",
    },
    RouteDef {
        name: RouteName::Admin,
        pattern: "/admin",
    },
];

/// Parameters handed to a view: captured path segments plus the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub path: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    pub params: RouteParams,
}

/// The route table, mounted under a base path.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base: Vec<String>,
    routes: &'static [RouteDef],
}

impl RouteTable {
    pub fn new(base_path: &str) -> Self {
        Self {
            base: segments(base_path).map(str::to_string).collect(),
            routes: ROUTES,
        }
    }

    pub fn routes(&self) -> &'static [RouteDef] {
        self.routes
    }

    /// Selects the single route matching `path`. Query string and fragment are ignored.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch, NavigationError> {
        let not_found = || NavigationError {
            path: path.to_string(),
        };

        let bare = path.split(['?', '#']).next().unwrap_or("");
        let requested: Vec<&str> = segments(bare).collect();

        let under_base = requested.len() >= self.base.len()
            && self.base.iter().zip(&requested).all(|(b, r)| b == r);
        if !under_base {
            return Err(not_found());
        }
        let relative = &requested[self.base.len()..];

        self.routes
            .iter()
            .find_map(|def| match_pattern(def, relative))
            .ok_or_else(not_found)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new("/")
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_pattern(def: &RouteDef, requested: &[&str]) -> Option<RouteMatch> {
    let pattern: Vec<&str> = segments(def.pattern).collect();
    if pattern.len() != requested.len() {
        return None;
    }

    let mut path = BTreeMap::new();
    for (expected, actual) in pattern.iter().zip(requested) {
        match expected.strip_prefix(':') {
            Some(param) => {
                path.insert(param.to_string(), actual.to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }

    Some(RouteMatch {
        name: def.name,
        params: RouteParams {
            path,
            query: BTreeMap::new(),
        },
    })
}
