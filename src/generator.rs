//! Generates one [`TagPage`] per tag occurrence and registers it with the
//! site's [`PageRegistry`].

use crate::defaults::DefaultsResolver;
use crate::page::TagPage;
use crate::post::Post;
use crate::registry::PageRegistry;
use crate::site::Site;
use crate::tag::collect_tags;
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Runs the tag page generator over `site`, appending the pages to
/// `site.pages`. Returns the number of pages generated.
pub fn generate(site: &mut Site) -> usize {
    generate_tag_pages(&site.posts, &site.source, &site.defaults, &mut site.pages)
}

/// Collects the tags of `posts` and appends one [`TagPage`] per tag
/// occurrence to `registry`. A tag used by several posts yields several pages
/// with the same output path; the posts themselves are left untouched.
pub fn generate_tag_pages(
    posts: &[Post],
    source: &Path,
    defaults: &Arc<dyn DefaultsResolver>,
    registry: &mut PageRegistry,
) -> usize {
    let tags = collect_tags(posts);
    for tag in &tags {
        let page = TagPage::new(source, tag, Arc::clone(defaults));
        debug!("generated tag page `{}`", page.relative_path());
        registry.push(page);
    }

    let distinct: HashSet<&str> = tags.iter().map(String::as_str).collect();
    info!(
        "generated {} tag pages for {} distinct tags",
        tags.len(),
        distinct.len()
    );
    tags.len()
}
