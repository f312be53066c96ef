use serde::{Deserialize, Serialize};

/// Initial view of one configured log, returned by `GET /logs`.
///
/// `seek_position` and `last_modification` are hex-encoded and seed the
/// cursor the client sends back on its first tail poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogView {
    pub name: String,
    /// Most recent content of the file, starting on a full line.
    pub content: String,
    pub seek_position: String,
    pub last_modification: String,
    /// Set when the file could not be read; the other fields are then empty
    /// or zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
