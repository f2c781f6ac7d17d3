//! Conversation turns and session history
//!
//! A `History` is owned by the caller (the UI session, or a request body) and
//! is only ever appended to. The prompt assembler borrows it read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

/// Speaker of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Stored form of the role, as it appears in assembled prompts
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// One exchange unit. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Turn {
    #[cfg(test)]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self::at(role, content, Utc::now())
    }

    pub fn at(role: Role, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    #[cfg(test)]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    #[cfg(test)]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation time. Informational only; never part of an assembled prompt.
    #[allow(dead_code)] // Read by callers that display turns
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Ordered, append-only sequence of turns (oldest first)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    #[cfg(test)]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl FromIterator<Turn> for History {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// A turn as it arrives over the wire (`chatHistory` entries).
///
/// Both fields are optional here so that a missing field surfaces as
/// `InvalidTurn` rather than a generic body rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct TurnPayload {
    #[serde(default)]
    #[ts(optional)]
    pub role: Option<String>,
    #[serde(default)]
    #[ts(optional)]
    pub content: Option<String>,
}

/// Why a wire turn could not become a `Turn`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTurn {
    #[error("turn {index} is missing a role")]
    MissingRole { index: usize },
    #[error("turn {index} is missing content")]
    MissingContent { index: usize },
    #[error("turn {index}: {source}")]
    UnknownRole { index: usize, source: UnknownRole },
}

impl TurnPayload {
    /// Convert the wire form, stamping the turn with the receive time
    pub fn into_turn(self, index: usize, received_at: DateTime<Utc>) -> Result<Turn, InvalidTurn> {
        let role = self.role.ok_or(InvalidTurn::MissingRole { index })?;
        let content = self.content.ok_or(InvalidTurn::MissingContent { index })?;
        let role = role
            .parse::<Role>()
            .map_err(|source| InvalidTurn::UnknownRole { index, source })?;
        Ok(Turn::at(role, content, received_at))
    }
}

/// Build a history from wire turns, failing on the first invalid entry
pub fn history_from_payload(payload: Vec<TurnPayload>) -> Result<History, InvalidTurn> {
    let received_at = Utc::now();
    payload
        .into_iter()
        .enumerate()
        .map(|(index, turn)| turn.into_turn(index, received_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(role: Option<&str>, content: Option<&str>) -> TurnPayload {
        TurnPayload {
            role: role.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::System, Role::User, Role::Assistant] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!(
            "User".parse::<Role>(),
            Err(UnknownRole("User".to_string()))
        );
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_history_preserves_insertion_order() {
        let mut history = History::new();
        assert_eq!(history.len(), 0);
        history.push(Turn::user("first"));
        history.push(Turn::assistant("second"));
        history.push(Turn::user("first"));

        let contents: Vec<&str> = history.iter().map(Turn::content).collect();
        assert_eq!(contents, vec!["first", "second", "first"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_history_from_payload() {
        let history = history_from_payload(vec![
            payload(Some("assistant"), Some("Hello!")),
            payload(Some("user"), Some("")),
        ])
        .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role(), Role::Assistant);
        assert_eq!(history.turns()[1].content(), "");
        assert_eq!(history.turns()[0].timestamp(), history.turns()[1].timestamp());
    }

    #[test]
    fn test_history_from_payload_rejects_missing_fields() {
        let err = history_from_payload(vec![
            payload(Some("user"), Some("ok")),
            payload(None, Some("no role")),
        ])
        .unwrap_err();
        assert_eq!(err, InvalidTurn::MissingRole { index: 1 });

        let err = history_from_payload(vec![payload(Some("user"), None)]).unwrap_err();
        assert_eq!(err, InvalidTurn::MissingContent { index: 0 });
    }

    #[test]
    fn test_history_from_payload_rejects_unknown_role() {
        let err = history_from_payload(vec![payload(Some("model"), Some("hi"))]).unwrap_err();
        assert!(matches!(err, InvalidTurn::UnknownRole { index: 0, .. }));
        assert_eq!(err.to_string(), "turn 0: unknown role: \"model\"");
    }
}
