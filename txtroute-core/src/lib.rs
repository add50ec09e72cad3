//! Recognition of `txt <group> <message>` commands.
//!
//! Given one line of chat input and a catalog of groups, decide whether the
//! line is a `txt` command, which group it names and what message follows.
//! Group names are matched case-insensitively and spaces are ignored on both
//! sides, so `Fire Team` is reachable as `fireteam` or `FIRE   TEAM`. Longer
//! names are tried first, and a name only matches when it ends on a word
//! boundary.
//!
//! ```rust
//! use txtroute_core::{recognize, Group};
//!
//! let groups = [Group::new(1, "Hotline"), Group::new(2, "Hotlines")];
//! let parsed = recognize("txt hotlines please help", &groups).unwrap();
//!
//! assert_eq!(parsed.group_id, 2);
//! assert_eq!(parsed.message_to_send, "please help");
//! ```

pub mod group;
pub mod matcher;
pub mod recognizer;

pub use group::{Group, ParseResult};
pub use matcher::{match_name, match_normalized, normalize_name};
pub use recognizer::{recognize, strip_command_token, Recognizer, COMMAND_TOKEN};
