//! Defines the [`PageRegistry`], the site's collection of generated pages.

use crate::page::TagPage;
use std::path::{Path, PathBuf};

/// The pages generated for a single build. Pages are only ever appended;
/// whatever renders the site iterates the registry afterwards.
#[derive(Debug, Default)]
pub struct PageRegistry {
    pages: Vec<TagPage>,
}

impl PageRegistry {
    pub fn new() -> PageRegistry {
        PageRegistry::default()
    }

    /// Appends `page` to the registry.
    pub fn push(&mut self, page: TagPage) {
        self.pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagPage> {
        self.pages.iter()
    }

    /// The output location of every page beneath `destination`, in
    /// registration order.
    pub fn output_paths(&self, destination: &Path) -> Vec<PathBuf> {
        self.pages
            .iter()
            .map(|page| page.output_path(destination))
            .collect()
    }
}

impl<'a> IntoIterator for &'a PageRegistry {
    type Item = &'a TagPage;
    type IntoIter = std::slice::Iter<'a, TagPage>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::defaults::{DefaultsResolver, FrontmatterDefaults};
    use std::sync::Arc;

    #[test]
    fn test_push_keeps_order() {
        let defaults: Arc<dyn DefaultsResolver> = Arc::new(FrontmatterDefaults::default());
        let mut registry = PageRegistry::new();
        assert!(registry.is_empty());

        for tag in &["b", "a", "b"] {
            registry.push(TagPage::new(Path::new("."), tag, defaults.clone()));
        }

        assert_eq!(3, registry.len());
        let tags: Vec<&str> = registry.iter().map(|p| p.tag()).collect();
        assert_eq!(vec!["b", "a", "b"], tags);
        assert_eq!(
            vec![
                PathBuf::from("out/tag/b.html"),
                PathBuf::from("out/tag/a.html"),
                PathBuf::from("out/tag/b.html"),
            ],
            registry.output_paths(Path::new("out"))
        );
    }
}
