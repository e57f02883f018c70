use std::str::FromStr;
use std::time::Duration;

use color_eyre::eyre::{eyre, Report};

use crate::domain::{
    modal::ModalSubject,
    reddit::{CommentRef, PostRef},
};

/// One line of input to the demo host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// `post <t3_id>` / `comment <t1_id> [<t3_id>]`
    Open(ModalSubject),
    /// `dismiss`
    Dismiss,
    /// `wait <ms>`
    Wait(Duration),
    /// `show`
    Show,
    /// `quit`
    Quit,
}

impl FromStr for HostCommand {
    type Err = Report;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(eyre!("empty command"));
        };
        let args: Vec<&str> = words.collect();

        match (verb, args.as_slice()) {
            ("post", [id]) => Ok(HostCommand::Open(ModalSubject::Post(id.parse()?))),
            ("comment", [id]) => Ok(HostCommand::Open(ModalSubject::Comment(id.parse()?))),
            ("comment", [id, link]) => {
                let comment = id.parse::<CommentRef>()?.with_link(link.parse::<PostRef>()?);
                Ok(HostCommand::Open(ModalSubject::Comment(comment)))
            }
            ("dismiss", []) => Ok(HostCommand::Dismiss),
            ("wait", [ms]) => {
                let ms: u64 = ms
                    .parse()
                    .map_err(|e| eyre!("wait expects milliseconds, got {ms:?}: {e}"))?;
                Ok(HostCommand::Wait(Duration::from_millis(ms)))
            }
            ("show", []) => Ok(HostCommand::Show),
            ("quit" | "exit", []) => Ok(HostCommand::Quit),
            (verb, args) => Err(eyre!(
                "unrecognised command {verb:?} with {} argument(s)",
                args.len()
            )),
        }
    }
}
