use serde::{Deserialize, Serialize};

/// A routing target: an opaque identifier paired with a display name.
///
/// The name may contain spaces anywhere; they are ignored when matching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group<Id = String> {
    pub id: Id,
    pub name: String,
}

impl<Id> Group<Id> {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Outcome of a recognised command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult<Id = String> {
    pub group_id: Id,
    /// Text after the group name, trimmed. May be empty.
    pub message_to_send: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_result_serializes_with_camel_case_fields() {
        let result = ParseResult {
            group_id: 7,
            message_to_send: "go now".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "groupId": 7, "messageToSend": "go now" })
        );
    }

    #[test]
    fn group_deserializes_from_id_and_name() {
        let group: Group = serde_json::from_value(json!({ "id": "ops", "name": "Fire Team" })).unwrap();
        assert_eq!(group, Group::new("ops".to_string(), "Fire Team"));
    }
}
