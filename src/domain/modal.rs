use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::domain::reddit::{CommentRef, PostRef};

/// What a reply sheet is being opened for.
///
/// New reply targets get their own variant here and a matching
/// [`Visibility`] value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ModalSubject {
    Post(PostRef),
    Comment(CommentRef),
}

impl ModalSubject {
    /// Visibility the coordinator settles on once this subject is revealed
    pub fn visibility(&self) -> Visibility {
        match self {
            ModalSubject::Post(_) => Visibility::ShowingPost,
            ModalSubject::Comment(_) => Visibility::ShowingComment,
        }
    }
}

impl From<PostRef> for ModalSubject {
    fn from(post: PostRef) -> Self {
        ModalSubject::Post(post)
    }
}

impl From<CommentRef> for ModalSubject {
    fn from(comment: CommentRef) -> Self {
        ModalSubject::Comment(comment)
    }
}

/// Which reply sheet is on screen. Exactly one value at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    None,
    ShowingPost,
    ShowingComment,
}

impl Visibility {
    pub fn is_showing(&self) -> bool {
        !matches!(self, Visibility::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::Result;
    use strum::IntoEnumIterator;

    #[test]
    fn test_subject_visibility() -> Result<()> {
        let post = ModalSubject::from("t3_a".parse::<PostRef>()?);
        let comment = ModalSubject::from("t1_b".parse::<CommentRef>()?);

        assert_eq!(post.visibility(), Visibility::ShowingPost);
        assert_eq!(comment.visibility(), Visibility::ShowingComment);

        Ok(())
    }

    #[test]
    fn test_visibility_names() -> Result<()> {
        let names: Vec<String> = Visibility::iter().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["none", "showing_post", "showing_comment"]);
        assert_eq!("showing_comment".parse::<Visibility>()?, Visibility::ShowingComment);
        assert!(!Visibility::default().is_showing());

        Ok(())
    }

    #[test]
    fn test_subject_serde() -> Result<()> {
        let subject = ModalSubject::Post("t3_q".parse()?);
        let json = serde_json::to_string(&subject)?;
        assert_eq!(json, r#"{"kind":"post","target":"t3_q"}"#);

        Ok(())
    }
}
