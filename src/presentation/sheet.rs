use color_eyre::eyre::Result;

use crate::{core::state::ModalSnapshot, domain::modal::ModalSubject};

/// Text rendering of the reply sheet for line-oriented hosts
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetView {
    json: bool,
}

impl SheetView {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn render(&self, snapshot: &ModalSnapshot) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string(snapshot)?);
        }

        let body = match snapshot.visible_subject() {
            Some(ModalSubject::Post(post)) => format!("replying to post {post}"),
            Some(ModalSubject::Comment(comment)) => format!("replying to comment {comment}"),
            None if snapshot.current_post.is_placeholder()
                && snapshot.current_comment.is_placeholder() =>
            {
                "no reply sheet".to_string()
            }
            // Still dismissing; subjects are kept until the sheet settles.
            None => format!(
                "no reply sheet (holding {} / {})",
                snapshot.current_post, snapshot.current_comment
            ),
        };

        Ok(format!("[{:>3}] {body}", snapshot.revision))
    }
}
