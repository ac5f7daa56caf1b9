//! Exports the [`build_site`] function which stitches together the steps of a
//! build: loading the configuration ([`crate::config`]), reading the posts
//! ([`crate::post`]), and generating the tag pages ([`crate::generator`]).

use crate::config::{Config, Error as ConfigError};
use crate::generator;
use crate::post::{parse_posts, Error as PostError};
use crate::site::Site;
use log::info;
use std::fmt;
use std::path::Path;

/// Builds the site found at (or above) `dir`. The returned [`Site`] holds the
/// generated pages, ready to be rendered.
pub fn build_site(dir: &Path) -> Result<Site> {
    let config = Config::from_directory(dir)?;
    let posts = parse_posts(&config.posts_directory)?;
    info!(
        "building `{}` with {} posts",
        config.source.display(),
        posts.len()
    );

    let mut site = Site::from_config(config, posts);
    generator::generate(&mut site);
    Ok(site)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the configuration.
    Config(ConfigError),

    /// Returned for errors reading posts.
    Post(PostError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Post(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Post(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    /// Converts [`ConfigError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl From<PostError> for Error {
    /// Converts [`PostError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PostError) -> Error {
        Error::Post(err)
    }
}
