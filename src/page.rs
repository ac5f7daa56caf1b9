//! Defines the [`TagPage`] type, the synthetic page generated for a tag.

use crate::defaults::DefaultsResolver;
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// The directory, relative to the site root, holding every tag page.
pub const TAG_DIR: &str = "tag";

/// The extension of every tag page.
pub const TAG_EXTENSION: &str = ".html";

/// The layout every tag page is rendered with.
pub const TAG_LAYOUT: &str = "tag_index";

/// The front-matter defaults scope type that tag pages resolve against.
pub const TAG_SCOPE_TYPE: &str = "categories";

/// A page representing the index of a single tag. The page is written to
/// `tag/<tag>.html`; the tag is used verbatim, so whatever string appears in a
/// post's tag list ends up in the output path.
///
/// The page's data holds a single explicit entry, `tag`. Reading any other key
/// goes through [`TagPage::data`], which answers `layout` itself and defers
/// everything else to the site's front-matter defaults.
pub struct TagPage {
    /// The site source directory the page is anchored to.
    source: PathBuf,

    /// The output directory relative to the site root. Always [`TAG_DIR`].
    dir: &'static str,

    /// The file name without extension, i.e., the tag.
    basename: String,

    /// The file extension. Always [`TAG_EXTENSION`].
    extension: &'static str,

    /// Explicitly set data. Starts out as `{tag: <tag>}`.
    data: Mapping,

    /// The fallback for data keys not present in `data`.
    defaults: Arc<dyn DefaultsResolver>,
}

impl TagPage {
    /// Builds the page for `tag`. `source` is the site source directory and
    /// `defaults` is the site's front-matter defaults.
    pub fn new(source: &Path, tag: &str, defaults: Arc<dyn DefaultsResolver>) -> TagPage {
        let mut data = Mapping::new();
        data.insert(
            Value::String("tag".to_owned()),
            Value::String(tag.to_owned()),
        );
        TagPage {
            source: source.to_owned(),
            dir: TAG_DIR,
            basename: tag.to_owned(),
            extension: TAG_EXTENSION,
            data,
            defaults,
        }
    }

    /// The tag this page represents.
    pub fn tag(&self) -> &str {
        &self.basename
    }

    pub fn dir(&self) -> &str {
        self.dir
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn extension(&self) -> &str {
        self.extension
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The page's path relative to the site root: `tag/<tag>.html`.
    pub fn relative_path(&self) -> String {
        format!("{}/{}{}", self.dir, self.basename, self.extension)
    }

    /// The location of the rendered page beneath `destination`.
    pub fn output_path(&self, destination: &Path) -> PathBuf {
        destination
            .join(self.dir)
            .join(format!("{}{}", self.basename, self.extension))
    }

    /// The page's URL beneath `base_url`. Unlike [`TagPage::output_path`],
    /// characters that aren't valid in a URL path are percent-encoded.
    pub fn url(&self, base_url: &Url) -> Result<Url, url::ParseError> {
        // without a trailing slash, `join` would replace the last segment of
        // the base path instead of appending to it
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&self.relative_path())
    }

    /// Reads the data value for `key`. Explicitly set keys come first; on a
    /// miss, `layout` resolves to [`TAG_LAYOUT`] and any other key is looked up
    /// in the front-matter defaults for this page's path and the
    /// [`TAG_SCOPE_TYPE`] scope. The lookup runs on every call.
    pub fn data(&self, key: &str) -> Option<Value> {
        let explicit = Value::String(key.to_owned());
        if let Some(value) = self.data.get(&explicit) {
            return Some(value.clone());
        }
        match key {
            "layout" => Some(Value::String(TAG_LAYOUT.to_owned())),
            _ => self
                .defaults
                .resolve(&self.relative_path(), TAG_SCOPE_TYPE, key),
        }
    }

    /// The layout the page is rendered with.
    pub fn layout(&self) -> Option<Value> {
        self.data("layout")
    }
}

impl fmt::Debug for TagPage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TagPage")
            .field("source", &self.source)
            .field("relative_path", &self.relative_path())
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::defaults::{DefaultSet, FrontmatterDefaults, Scope};
    use std::sync::Mutex;

    /// Records every lookup and answers with a fixed value.
    #[derive(Default)]
    struct RecordingResolver {
        calls: Mutex<Vec<(String, String, String)>>,
        answer: Option<Value>,
    }

    impl DefaultsResolver for RecordingResolver {
        fn resolve(&self, relative_path: &str, scope_type: &str, key: &str) -> Option<Value> {
            self.calls.lock().unwrap().push((
                relative_path.to_owned(),
                scope_type.to_owned(),
                key.to_owned(),
            ));
            self.answer.clone()
        }
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_owned())
    }

    #[test]
    fn test_paths() {
        let page = TagPage::new(
            Path::new("site"),
            "rust",
            Arc::new(FrontmatterDefaults::default()),
        );
        assert_eq!("tag", page.dir());
        assert_eq!("rust", page.basename());
        assert_eq!(".html", page.extension());
        assert_eq!("tag/rust.html", page.relative_path());
        assert_eq!(
            PathBuf::from("_site/tag/rust.html"),
            page.output_path(Path::new("_site"))
        );
    }

    #[test]
    fn test_paths_are_verbatim() {
        let defaults: Arc<dyn DefaultsResolver> = Arc::new(FrontmatterDefaults::default());
        let page = TagPage::new(Path::new("site"), "Rust Lang", defaults.clone());
        assert_eq!("tag/Rust Lang.html", page.relative_path());
        let page = TagPage::new(Path::new("site"), "", defaults);
        assert_eq!("tag/.html", page.relative_path());
        assert_eq!("", page.basename());
    }

    #[test]
    fn test_url() -> Result<(), url::ParseError> {
        let page = TagPage::new(
            Path::new("site"),
            "rust",
            Arc::new(FrontmatterDefaults::default()),
        );
        let base = Url::parse("https://blog.example.com/")?;
        assert_eq!("https://blog.example.com/tag/rust.html", page.url(&base)?.as_str());
        let base = Url::parse("https://example.com/blog")?;
        assert_eq!("https://example.com/blog/tag/rust.html", page.url(&base)?.as_str());
        Ok(())
    }

    #[test]
    fn test_tag_never_falls_back() {
        let resolver = Arc::new(RecordingResolver {
            answer: Some(string("from defaults")),
            ..Default::default()
        });
        let page = TagPage::new(Path::new("site"), "python", resolver.clone());
        assert_eq!(Some(string("python")), page.data("tag"));
        assert_eq!("python", page.tag());
        assert!(resolver.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_layout_ignores_defaults() {
        let defaults = FrontmatterDefaults::new(vec![DefaultSet {
            scope: Scope {
                path: String::new(),
                scope_type: None,
            },
            values: serde_yaml::from_str("layout: default").unwrap(),
        }]);
        let page = TagPage::new(Path::new("site"), "python", Arc::new(defaults));
        assert_eq!(Some(string("tag_index")), page.data("layout"));
        assert_eq!(Some(string("tag_index")), page.layout());
    }

    #[test]
    fn test_other_keys_delegate_on_every_read() {
        let resolver = Arc::new(RecordingResolver::default());
        let page = TagPage::new(Path::new("site"), "python", resolver.clone());

        assert_eq!(None, page.data("title"));
        assert_eq!(None, page.data("title"));

        let call = (
            "tag/python.html".to_owned(),
            "categories".to_owned(),
            "title".to_owned(),
        );
        assert_eq!(vec![call.clone(), call], *resolver.calls.lock().unwrap());
    }

    #[test]
    fn test_defaults_fallback() {
        let defaults = FrontmatterDefaults::new(vec![DefaultSet {
            scope: Scope {
                path: "tag".to_owned(),
                scope_type: Some("categories".to_owned()),
            },
            values: serde_yaml::from_str("description: Tagged posts").unwrap(),
        }]);
        let page = TagPage::new(Path::new("site"), "python", Arc::new(defaults));
        assert_eq!(Some(string("Tagged posts")), page.data("description"));
        assert_eq!(None, page.data("title"));
    }
}
