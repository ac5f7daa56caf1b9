//! Loads the site configuration from `_config.yml`.

use crate::defaults::FrontmatterDefaults;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the site configuration file.
pub const CONFIG_FILE: &str = "_config.yml";

#[derive(Deserialize, Default)]
struct Project {
    /// The site's base URL. An empty string is treated as unset.
    #[serde(default)]
    url: Option<String>,

    /// The site source directory, relative to the configuration file.
    #[serde(default)]
    source: Option<PathBuf>,

    /// The posts directory, relative to the source directory.
    #[serde(default)]
    posts_dir: Option<PathBuf>,

    #[serde(default)]
    defaults: FrontmatterDefaults,
}

/// The resolved site configuration.
#[derive(Debug)]
pub struct Config {
    /// The site source directory.
    pub source: PathBuf,

    /// The directory posts are read from.
    pub posts_directory: PathBuf,

    /// The site's base URL.
    pub url: Option<Url>,

    /// The site's front-matter defaults.
    pub defaults: FrontmatterDefaults,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for [`CONFIG_FILE`] and
    /// loads the first one found. `dir` is canonicalized first, so relative
    /// paths such as `.` or `..` still reach the filesystem root.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let dir = dir.canonicalize().map_err(|err| Error::Io {
            path: dir.to_owned(),
            err,
        })?;
        Config::search_ancestors(&dir)
    }

    fn search_ancestors(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Config::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::search_ancestors(parent),
                None => Err(Error::NotFound),
            }
        }
    }

    /// Loads the configuration file at `path`. Relative paths in the file are
    /// resolved against the file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        debug!("loading configuration from `{}`", path.display());
        let project_root = path.parent().unwrap_or_else(|| Path::new("."));

        use std::io::Read;
        let mut contents = String::new();
        File::open(path)
            .map_err(|err| Error::Io {
                path: path.to_owned(),
                err,
            })?
            .read_to_string(&mut contents)
            .map_err(|err| Error::Io {
                path: path.to_owned(),
                err,
            })?;

        let project: Project = if contents.trim().is_empty() {
            Project::default()
        } else {
            serde_yaml::from_str(&contents)?
        };

        let source = match project.source {
            Some(source) => project_root.join(source),
            None => project_root.to_owned(),
        };
        let posts_directory =
            source.join(project.posts_dir.unwrap_or_else(|| PathBuf::from("_posts")));
        let url = match project.url {
            Some(url) if !url.is_empty() => Some(Url::parse(&url)?),
            _ => None,
        };

        Ok(Config {
            source,
            posts_directory,
            url,
            defaults: project.defaults,
        })
    }
}

/// The result of a fallible configuration operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the site configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no configuration file exists in the directory or any of
    /// its ancestors.
    NotFound,

    /// Returned when the configuration file or the directory searched for it
    /// can't be read.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned when the configuration file isn't valid YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when the configured `url` isn't a valid URL.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                CONFIG_FILE
            ),
            Error::Io { path, err } => {
                write!(f, "Reading '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::UrlParse(err) => write!(f, "Parsing site url: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound => None,
            Error::Io { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`].
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`].
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
