//! Defines the [`Post`] and [`Error`] types along with the logic for reading
//! post front matter from the file system. Only the YAML front matter is read;
//! post bodies are left for the rendering pipeline.

use std::{
    fmt,
    fs::File,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use serde::{Deserialize, Deserializer};
use walkdir::WalkDir;

/// A blog post as seen by the tag generator. Posts are loaded once before
/// generation and are never mutated afterwards.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Post {
    /// The path of the post's source file relative to the posts directory.
    #[serde(skip)]
    pub relative_path: PathBuf,

    /// The title of the post.
    #[serde(default)]
    pub title: Option<String>,

    /// The date of the post.
    #[serde(default)]
    pub date: Option<String>,

    /// The tags associated with the post, verbatim and in declaration order.
    /// `None` when the front matter has no `tags` key at all. See
    /// `deserialize_tags` for the accepted forms.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Option<Vec<String>>,
}

/// Deserializes a post's `tags` from either a YAML list, whose entries are
/// kept verbatim, or a single string such as `rust shorts`, which is split on
/// whitespace.
fn deserialize_tags<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Words(String),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        None => None,
        Some(Tags::List(tags)) => Some(tags),
        Some(Tags::Words(words)) => Some(words.split_whitespace().map(str::to_owned).collect()),
    })
}

impl Post {
    /// Returns the post's tags, treating a missing tag list as an empty one.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Parses a single [`Post`] from its source text. The text must begin with
    /// a `---` fence followed by YAML front matter and a closing `---` fence.
    /// Anything after the closing fence is ignored.
    pub fn from_str(relative_path: &Path, input: &str) -> Result<Post> {
        fn frontmatter_bounds(input: &str) -> Result<(usize, usize)> {
            const FENCE: &str = "---";
            if !input.starts_with(FENCE) {
                return Err(Error::FrontmatterMissingStartFence);
            }
            match input[FENCE.len()..].find("\n---") {
                None => Err(Error::FrontmatterMissingEndFence),
                Some(offset) => Ok((
                    FENCE.len(),          // yaml_start
                    FENCE.len() + offset, // yaml_stop
                )),
            }
        }

        let (yaml_start, yaml_stop) = frontmatter_bounds(input)?;
        let yaml = &input[yaml_start..yaml_stop];
        let mut post: Post = if yaml.trim().is_empty() {
            Post::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        post.relative_path = relative_path.to_owned();
        Ok(post)
    }
}

const POST_EXTENSIONS: &[&str] = &["md", "markdown", "html"];

/// Walks `posts_directory` and returns every post found in it, ordered by
/// relative path. Post file names begin with their date, so this is also
/// chronological order.
pub fn parse_posts(posts_directory: &Path) -> Result<Vec<Post>> {
    let mut posts = Vec::new();
    for result in WalkDir::new(posts_directory) {
        let entry = result?;
        if !entry.file_type().is_file() || !is_post_file(entry.path()) {
            continue;
        }

        // strip_prefix() should never fail since the walk is rooted at
        // `posts_directory`
        let relative_path = entry
            .path()
            .strip_prefix(posts_directory)
            .unwrap_or_else(|_| entry.path());
        let post = parse_post(entry.path(), relative_path)?;
        if post.tags.is_none() {
            trace!("post `{}` declares no tags", relative_path.display());
        }
        posts.push(post);
    }

    posts.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!(
        "loaded {} posts from `{}`",
        posts.len(),
        posts_directory.display()
    );
    Ok(posts)
}

fn is_post_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => POST_EXTENSIONS.contains(&ext),
        None => false,
    }
}

fn parse_post(full_path: &Path, relative_path: &Path) -> Result<Post> {
    fn read(full_path: &Path, relative_path: &Path) -> Result<Post> {
        use std::io::Read;
        let mut contents = String::new();
        File::open(full_path)?.read_to_string(&mut contents)?;
        Post::from_str(relative_path, &contents)
    }

    read(full_path, relative_path).map_err(|e| {
        Error::Annotated(
            format!("parsing post `{}`", relative_path.display()),
            Box::new(e),
        )
    })
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence (`---` i.e., the starting fence was found but the ending one was
    /// missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Post must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`].
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_str_keeps_tag_order_and_duplicates() -> Result<()> {
        let post = Post::from_str(
            Path::new("2021-01-01-hello.md"),
            "---\ntitle: Hello\ntags: [rust, shorts, rust]\n---\n# Hello\n",
        )?;
        assert_eq!(Some("Hello".to_owned()), post.title);
        assert_eq!(&["rust", "shorts", "rust"], post.tags());
        assert_eq!(PathBuf::from("2021-01-01-hello.md"), post.relative_path);
        Ok(())
    }

    #[test]
    fn test_from_str_missing_tags() -> Result<()> {
        let post = Post::from_str(Path::new("a.md"), "---\ntitle: A\n---\n")?;
        assert_eq!(None, post.tags);
        assert!(post.tags().is_empty());
        Ok(())
    }

    #[test]
    fn test_from_str_scalar_tags() -> Result<()> {
        let post = Post::from_str(Path::new("a.md"), "---\ntags: rust  shorts\n---\n")?;
        assert_eq!(&["rust", "shorts"], post.tags());

        let post = Post::from_str(Path::new("a.md"), "---\ntags: rust\n---\n")?;
        assert_eq!(&["rust"], post.tags());

        let post = Post::from_str(Path::new("a.md"), "---\ntags:\n---\n")?;
        assert_eq!(None, post.tags);
        Ok(())
    }

    #[test]
    fn test_from_str_invalid_tags() {
        match Post::from_str(Path::new("a.md"), "---\ntags: {rust: 1}\n---\n") {
            Err(Error::DeserializeYaml(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_str_empty_frontmatter() -> Result<()> {
        let post = Post::from_str(Path::new("a.md"), "---\n---\nbody")?;
        assert_eq!(None, post.tags);
        Ok(())
    }

    #[test]
    fn test_from_str_tags_are_not_normalized() -> Result<()> {
        let post = Post::from_str(
            Path::new("a.md"),
            "---\ntags: [\"Rust\", \" spaced \", \"\"]\n---\n",
        )?;
        assert_eq!(&["Rust", " spaced ", ""], post.tags());
        Ok(())
    }

    #[test]
    fn test_from_str_missing_fences() {
        match Post::from_str(Path::new("a.md"), "title: A\n") {
            Err(Error::FrontmatterMissingStartFence) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        match Post::from_str(Path::new("a.md"), "---\ntitle: A\n") {
            Err(Error::FrontmatterMissingEndFence) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_posts() -> Result<()> {
        let posts = parse_posts(Path::new("./testdata/site/_posts"))?;
        let paths: Vec<&Path> =
            posts.iter().map(|p| p.relative_path.as_path()).collect();
        assert_eq!(
            vec![
                Path::new("2021-01-01-hello.md"),
                Path::new("2021-02-01-again.md"),
                Path::new("2021-03-01-untagged.md"),
            ],
            paths
        );
        assert_eq!(&["rust", "shorts"], posts[0].tags());
        assert_eq!(&["rust"], posts[1].tags());
        assert_eq!(None, posts[2].tags);
        Ok(())
    }
}
