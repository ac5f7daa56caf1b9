//! The library code for the `tagpages` generator. It produces one "tag index"
//! page for every tag attached to a blog post. The architecture can be
//! generally broken down into three steps:
//!
//! 1. Loading the site configuration and post front matter ([`crate::config`],
//!    [`crate::post`])
//! 2. Collecting the tag of every post ([`crate::tag`])
//! 3. Synthesizing a [`crate::page::TagPage`] per tag and registering it with
//!    the site's [`crate::registry::PageRegistry`] ([`crate::generator`])
//!
//! Rendering the pages is left to whatever consumes the registry. A tag page
//! only knows its output location and how to answer questions about its data:
//! the `tag` key is stored on the page, `layout` is always `tag_index`, and
//! every other key falls back to the site's front-matter defaults
//! ([`crate::defaults`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod defaults;
pub mod generator;
pub mod logging;
pub mod page;
pub mod post;
pub mod registry;
pub mod site;
pub mod tag;
