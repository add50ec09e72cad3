//! Space-insensitive, case-insensitive prefix matching of group names.
//!
//! The scan walks the input and the normalized name side by side. Spaces in
//! the input are skipped, every other character must equal the next name
//! character once lowercased. There is no backtracking: the first mismatch
//! ends the attempt.

/// The only input character skipped during the scan and accepted as a word
/// boundary after the name.
const SPACE: char = ' ';

/// Strip all whitespace from `name` and lowercase what is left.
///
/// Lowercasing is applied per character so that it agrees with how input
/// characters are lowercased during [`match_normalized`].
///
/// ```
/// use txtroute_core::normalize_name;
///
/// assert_eq!(normalize_name(" Fire\tTeam "), "fireteam");
/// assert_eq!(normalize_name("   "), "");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Match `candidate_name` at the start of `input`.
///
/// Returns the byte offset in `input` just past the last matched character,
/// or `None` when the name does not match or is immediately followed by a
/// non-space character.
///
/// ```
/// use txtroute_core::match_name;
///
/// assert_eq!(match_name("FIRE  team go", "Fire Team"), Some(10));
/// assert_eq!(match_name("alphabet soup", "Alpha"), None);
/// ```
pub fn match_name(input: &str, candidate_name: &str) -> Option<usize> {
    match_normalized(input, &normalize_name(candidate_name))
}

/// Same as [`match_name`] for a name already passed through [`normalize_name`].
pub fn match_normalized(input: &str, target: &str) -> Option<usize> {
    let mut expected = target.chars().peekable();
    let mut end = input.len();

    for (i, c) in input.char_indices() {
        if expected.peek().is_none() {
            end = i;
            break;
        }
        if c == SPACE {
            continue;
        }
        // A character can lowercase to several; each must line up with the name.
        for lower in c.to_lowercase() {
            if expected.next() != Some(lower) {
                return None;
            }
        }
    }

    if expected.peek().is_some() {
        return None;
    }

    match input[end..].chars().next() {
        None | Some(SPACE) => Some(end),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fireteam go", "Fire Team", Some(8))]
    #[case("fire  team go", "Fire Team", Some(10))]
    #[case("FIRE TEAM", "Fire Team", Some(9))]
    #[case("f i r e team", "fireteam", Some(12))]
    #[case("hotline", "Hotline", Some(7))]
    #[case("hotlines help", "Hotline", None)]
    #[case("hotlines help", "Hotlines", Some(8))]
    #[case("alpha", "alphabet", None)]
    #[case("beta alpha", "alpha", None)]
    #[case("alph a", "alpha", Some(6))]
    #[case("", "alpha", None)]
    fn matches_names(#[case] input: &str, #[case] name: &str, #[case] expected: Option<usize>) {
        assert_eq!(match_name(input, name), expected);
    }

    #[test]
    fn split_point_excludes_trailing_space() {
        let input = "ops   status report";
        let end = match_name(input, "ops").unwrap();
        assert_eq!(end, 3);
        assert_eq!(&input[end..], "   status report");
    }

    #[test]
    fn empty_name_matches_only_before_space_or_end() {
        assert_eq!(match_name("", ""), Some(0));
        assert_eq!(match_name("  msg", "   "), Some(0));
        assert_eq!(match_name("msg", ""), None);
    }

    #[test]
    fn only_plain_spaces_are_skipped_in_input() {
        assert_eq!(match_name("fire\tteam", "Fire Team"), None);
        assert_eq!(match_name("fire team\tgo", "Fire Team"), None);
    }

    #[test]
    fn non_ascii_names_are_lowercased() {
        let input = "ÉQUIPE Été salut";
        let end = match_name(input, "équipe été").unwrap();
        assert_eq!(input[end..].trim(), "salut");
    }

    #[test]
    fn returned_offset_is_a_char_boundary() {
        let input = "café ☕ later";
        let end = match_name(input, "Café").unwrap();
        assert!(input.is_char_boundary(end));
        assert_eq!(&input[end..], " ☕ later");
    }
}
