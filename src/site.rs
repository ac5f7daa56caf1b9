//! Defines the [`Site`], the state shared across a single build.

use crate::config::Config;
use crate::defaults::DefaultsResolver;
use crate::post::Post;
use crate::registry::PageRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Everything a build reads from and writes into. The posts and defaults are
/// loaded before generation starts and stay unchanged; generators only append
/// to `pages`.
pub struct Site {
    /// The site source directory.
    pub source: PathBuf,

    /// The site's base URL, if configured.
    pub url: Option<Url>,

    /// The site's posts in chronological order.
    pub posts: Vec<Post>,

    /// The site's front-matter defaults.
    pub defaults: Arc<dyn DefaultsResolver>,

    /// The pages generated during this build.
    pub pages: PageRegistry,
}

impl Site {
    pub fn new(source: PathBuf, posts: Vec<Post>, defaults: Arc<dyn DefaultsResolver>) -> Site {
        Site {
            source,
            url: None,
            posts,
            defaults,
            pages: PageRegistry::new(),
        }
    }

    /// Builds a site with no generated pages yet from a loaded [`Config`] and
    /// its posts.
    pub fn from_config(config: Config, posts: Vec<Post>) -> Site {
        Site {
            source: config.source,
            url: config.url,
            posts,
            defaults: Arc::new(config.defaults),
            pages: PageRegistry::new(),
        }
    }
}
