use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::group::{Group, ParseResult};
use crate::matcher::{match_normalized, normalize_name};

/// Leading token that marks a line as a routing command. Compared ASCII
/// case-insensitively.
pub const COMMAND_TOKEN: &str = "txt";

/// Return the text following the `txt` token, or `None` when the line is
/// not a command or carries nothing after the token.
///
/// The line is trimmed on both ends, but only leading whitespace is removed
/// from the remainder.
///
/// ```
/// use txtroute_core::strip_command_token;
///
/// assert_eq!(strip_command_token("  TXT  ops hi "), Some("ops hi"));
/// assert_eq!(strip_command_token("txt   "), None);
/// assert_eq!(strip_command_token("text ops"), None);
/// ```
pub fn strip_command_token(raw_input: &str) -> Option<&str> {
    let trimmed = raw_input.trim();
    let head = trimmed.get(..COMMAND_TOKEN.len())?;
    if !head.eq_ignore_ascii_case(COMMAND_TOKEN) {
        return None;
    }

    let remainder = trimmed[COMMAND_TOKEN.len()..].trim_start();
    (!remainder.is_empty()).then_some(remainder)
}

/// Recognise a `txt <group> <message>` command against `groups`.
///
/// Shorthand for building a [`Recognizer`] over the slice and calling
/// [`Recognizer::recognize`] once.
///
/// ```
/// use txtroute_core::{recognize, Group};
///
/// let groups = [Group::new("ft", "Fire Team")];
/// let parsed = recognize("txt   fire   team   go now", &groups).unwrap();
/// assert_eq!(parsed.group_id, "ft");
/// assert_eq!(parsed.message_to_send, "go now");
///
/// assert!(recognize("txt alphabet soup", &[Group::new(1, "Alpha")]).is_none());
/// ```
pub fn recognize<Id: Clone>(raw_input: &str, groups: &[Group<Id>]) -> Option<ParseResult<Id>> {
    Recognizer::new(groups).recognize(raw_input)
}

struct Candidate<'a, Id> {
    group: &'a Group<Id>,
    target: String,
}

/// A catalog snapshot prepared for repeated recognition.
///
/// Names are normalized once and the candidates are ordered by descending
/// normalized length, so `Hotlines` is always tried before `Hotline`. Groups
/// with equal normalized length keep their catalog order.
pub struct Recognizer<'a, Id> {
    candidates: Vec<Candidate<'a, Id>>,
}

impl<'a, Id: Clone> Recognizer<'a, Id> {
    pub fn new(groups: &'a [Group<Id>]) -> Self {
        let mut candidates: Vec<Candidate<'a, Id>> = groups
            .iter()
            .map(|group| Candidate {
                target: normalize_name(&group.name),
                group,
            })
            .collect();
        // stable: ties stay in catalog order
        candidates.sort_by_key(|candidate| Reverse(candidate.target.chars().count()));

        Self { candidates }
    }

    /// Route one line of input. The first candidate in priority order whose
    /// name matches wins, even if a later one would also match.
    pub fn recognize(&self, raw_input: &str) -> Option<ParseResult<Id>> {
        let Some(remainder) = strip_command_token(raw_input) else {
            trace!("input is not a txt command");
            return None;
        };

        for candidate in &self.candidates {
            trace!(group = %candidate.group.name, "trying candidate");
            if let Some(end) = match_normalized(remainder, &candidate.target) {
                let message = remainder[end..].trim();
                debug!(
                    group = %candidate.group.name,
                    message_len = message.len(),
                    "txt command recognised"
                );
                return Some(ParseResult {
                    group_id: candidate.group.id.clone(),
                    message_to_send: message.to_string(),
                });
            }
        }

        debug!(
            candidates = self.candidates.len(),
            "txt command did not name a known group"
        );
        None
    }

    /// Groups in the order they are attempted.
    pub fn priority_order(&self) -> impl Iterator<Item = &'a Group<Id>> + '_ {
        self.candidates.iter().map(|candidate| candidate.group)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
