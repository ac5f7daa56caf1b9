//! Collects the tags declared by a site's [`crate::post::Post`]s.

use crate::post::Post;

/// Returns every tag of every post: posts in order, and each post's tags in
/// the order the post declares them. Nothing is deduplicated, sorted, or
/// filtered, so a tag shared by three posts appears three times. Posts without
/// a `tags` key contribute nothing.
pub fn collect_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags().iter().cloned())
        .collect()
}
