//! Aggregations over a list of blogs
//!
//! All functions are pure and accept an empty slice. When several entries
//! tie for the maximum, the one appearing first in the input wins.

use serde::{Deserialize, Serialize};

use crate::models::Blog;

/// Anything that can be aggregated as a blog entry
pub trait BlogEntry {
    /// Display author, if any
    fn author(&self) -> Option<&str>;
    /// Like count; entries without one count as 0
    fn likes(&self) -> i64;
}

impl BlogEntry for Blog {
    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn likes(&self) -> i64 {
        self.likes
    }
}

/// Author with the most blogs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

/// Author with the most cumulative likes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

/// Sum of likes across all blogs, saturating at `i64::MAX`
pub fn total_likes<B: BlogEntry>(blogs: &[B]) -> i64 {
    blogs
        .iter()
        .fold(0i64, |total, blog| total.saturating_add(blog.likes()))
}

/// Blog with the strictly greatest like count
///
/// Returns `None` for an empty list.
pub fn favorite_blog<B: BlogEntry>(blogs: &[B]) -> Option<&B> {
    let mut favorite: Option<&B> = None;
    for blog in blogs {
        match favorite {
            Some(current) if current.likes() >= blog.likes() => {}
            _ => favorite = Some(blog),
        }
    }
    favorite
}

/// Author who wrote the most blogs
///
/// Returns `None` if the list is empty or any blog has no author.
pub fn most_blogs<B: BlogEntry>(blogs: &[B]) -> Option<AuthorBlogs> {
    let (author, count) = tally_by_author(blogs, |_| 1)?;
    Some(AuthorBlogs {
        author,
        blogs: count as usize,
    })
}

/// Author whose blogs have the most likes in total
///
/// Returns `None` if the list is empty or any blog has no author.
pub fn most_likes<B: BlogEntry>(blogs: &[B]) -> Option<AuthorLikes> {
    let (author, likes) = tally_by_author(blogs, |blog| blog.likes())?;
    Some(AuthorLikes { author, likes })
}

/// Accumulate `weight` per author, keeping authors in first-seen order, and
/// return the first author holding the maximum total.
fn tally_by_author<B, F>(blogs: &[B], weight: F) -> Option<(String, i64)>
where
    B: BlogEntry,
    F: Fn(&B) -> i64,
{
    let mut totals: Vec<(&str, i64)> = Vec::new();
    for blog in blogs {
        let author = blog.author().filter(|a| !a.is_empty())?;
        match totals.iter_mut().find(|(name, _)| *name == author) {
            Some((_, total)) => *total = total.saturating_add(weight(blog)),
            None => totals.push((author, weight(blog))),
        }
    }

    let mut best: Option<(&str, i64)> = None;
    for &(author, total) in &totals {
        match best {
            Some((_, max)) if max >= total => {}
            _ => best = Some((author, total)),
        }
    }
    best.map(|(author, total)| (author.to_string(), total))
}
