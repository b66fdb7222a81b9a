//! Request path tables.
//!
//! # Responsibilities
//! - Hold the literal request paths the catalogue draws from
//! - Pick one path uniformly at random
//!
//! # Design Decisions
//! - Tables are `'static` slices; nothing is allocated or mutated at runtime
//! - Order is preserved so listings and tests are stable

use rand::seq::SliceRandom;
use rand::Rng;

/// Routes the target application serves.
pub const KNOWN_ROUTES: PathSet = PathSet::new(
    "known-routes",
    &["/", "/google", "/amazon", "/walmart", "/nike", "/github"],
);

/// Routes that forward to a third-party site.
pub const PROXY_ROUTES: PathSet = PathSet::new(
    "proxy-routes",
    &["/google", "/amazon", "/walmart", "/nike", "/github"],
);

/// Paths that do not exist on the target and should answer 404.
pub const MISSING_PAGES: PathSet = PathSet::new(
    "missing-pages",
    &[
        "/nonexistent",
        "/random-page",
        "/test-404",
        "/missing-route",
        "/fake-asset.css",
        "/fake-script.js",
    ],
);

/// Asset requests a browser would make on its own.
pub const MISSING_ASSETS: PathSet = PathSet::new(
    "missing-assets",
    &[
        "/favicon.ico",
        "/robots.txt",
        "/sitemap.xml",
        "/css/style.css",
        "/js/app.js",
    ],
);

/// Named, ordered list of literal request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSet {
    name: &'static str,
    paths: &'static [&'static str],
}

impl PathSet {
    pub const fn new(name: &'static str, paths: &'static [&'static str]) -> Self {
        Self { name, paths }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn paths(&self) -> &'static [&'static str] {
        self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| *p == path)
    }

    /// Pick one path uniformly. Returns `None` only for an empty set.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        self.paths.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL: [PathSet; 4] = [KNOWN_ROUTES, PROXY_ROUTES, MISSING_PAGES, MISSING_ASSETS];

    #[test]
    fn test_paths_are_absolute() {
        for set in ALL {
            assert!(!set.paths().is_empty(), "{} is empty", set.name());
            for path in set.paths() {
                assert!(path.starts_with('/'), "{} in {}", path, set.name());
            }
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(KNOWN_ROUTES.paths().len(), 6);
        assert_eq!(PROXY_ROUTES.paths().len(), 5);
        assert_eq!(MISSING_PAGES.paths().len(), 6);
        assert_eq!(MISSING_ASSETS.paths().len(), 5);
    }

    #[test]
    fn test_proxy_routes_are_known() {
        for path in PROXY_ROUTES.paths() {
            assert!(KNOWN_ROUTES.contains(path));
        }
        assert!(!PROXY_ROUTES.contains("/"));
    }

    #[test]
    fn test_choose_covers_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let path = MISSING_ASSETS.choose(&mut rng).unwrap();
            assert!(MISSING_ASSETS.contains(path));
            seen.insert(path);
        }
        assert_eq!(seen.len(), MISSING_ASSETS.paths().len());
    }

    #[test]
    fn test_choose_empty() {
        let empty = PathSet::new("empty", &[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(empty.choose(&mut rng), None);
    }
}
