use std::fmt;
use std::str::FromStr;

use color_eyre::eyre::{eyre, Report};
use serde::{Deserialize, Serialize};

fn parse_fullname(s: &str, kind: &str) -> Result<String, Report> {
    let s = s.trim();
    let id = match s.split_once('_') {
        Some((prefix, id)) if prefix == kind => id,
        Some((prefix, _)) => {
            return Err(eyre!("expected a {kind}_ fullname, got {prefix}_ in {s:?}"));
        }
        None => s,
    };

    if id.is_empty() {
        return Err(eyre!("empty id in {s:?}"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    {
        return Err(eyre!("id must be base36 (0-9, a-z): {s:?}"));
    }

    Ok(id.to_string())
}

/// Handle to a Reddit link (`t3_*`).
///
/// The feed layer owns the actual post data; the coordinator only needs
/// something it can compare and hand back to the view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PostRef {
    id: String,
}

impl PostRef {
    pub const KIND: &'static str = "t3";

    /// Zero-state value shown while no post is selected.
    /// Never produced by parsing, so it cannot collide with a real post.
    pub fn placeholder() -> Self {
        Self { id: String::new() }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fullname(&self) -> String {
        format!("{}_{}", Self::KIND, self.id)
    }
}

impl FromStr for PostRef {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fullname(s, Self::KIND).map(|id| Self { id })
    }
}

impl TryFrom<String> for PostRef {
    type Error = Report;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self::placeholder());
        }
        value.parse()
    }
}

impl From<PostRef> for String {
    fn from(post: PostRef) -> Self {
        if post.is_placeholder() {
            String::new()
        } else {
            post.fullname()
        }
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            write!(f, "<no post>")
        } else {
            write!(f, "{}", self.fullname())
        }
    }
}

/// Handle to a Reddit comment (`t1_*`) together with the link it was made on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCommentRef")]
pub struct CommentRef {
    id: CommentId,
    link: PostRef,
}

#[derive(Deserialize)]
struct RawCommentRef {
    id: CommentId,
    link: PostRef,
}

impl TryFrom<RawCommentRef> for CommentRef {
    type Error = Report;

    fn try_from(raw: RawCommentRef) -> Result<Self, Self::Error> {
        // The placeholder has no link; anything else needs a real comment id.
        if raw.id.0.is_empty() && !raw.link.is_placeholder() {
            return Err(eyre!("comment on {} is missing its id", raw.link.fullname()));
        }
        Ok(Self {
            id: raw.id,
            link: raw.link,
        })
    }
}

// Keeps the comment id serialized as a `t1_` fullname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
struct CommentId(String);

impl TryFrom<String> for CommentId {
    type Error = Report;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self(String::new()));
        }
        parse_fullname(&value, CommentRef::KIND).map(Self)
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> Self {
        if id.0.is_empty() {
            String::new()
        } else {
            format!("{}_{}", CommentRef::KIND, id.0)
        }
    }
}

impl CommentRef {
    pub const KIND: &'static str = "t1";

    /// Zero-state value shown while no comment is selected.
    pub fn placeholder() -> Self {
        Self {
            id: CommentId(String::new()),
            link: PostRef::placeholder(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.0.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.id.0
    }

    pub fn fullname(&self) -> String {
        format!("{}_{}", Self::KIND, self.id.0)
    }

    /// The post this comment belongs to (placeholder when unknown).
    pub fn link(&self) -> &PostRef {
        &self.link
    }

    /// Attaches the owning post. The placeholder stays linkless.
    pub fn with_link(mut self, link: PostRef) -> Self {
        if !self.is_placeholder() {
            self.link = link;
        }
        self
    }
}

impl FromStr for CommentRef {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fullname(s, Self::KIND).map(|id| Self {
            id: CommentId(id),
            link: PostRef::placeholder(),
        })
    }
}

impl fmt::Display for CommentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            return write!(f, "<no comment>");
        }
        if self.link.is_placeholder() {
            write!(f, "{}", self.fullname())
        } else {
            write!(f, "{} on {}", self.fullname(), self.link.fullname())
        }
    }
}
