//! Client-side server descriptor.

use crate::canonical::domain::CanonicalServer;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The `{ command, args?, env? }` shape every supported client accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    /// Executable to launch.
    pub command: String,
    /// Arguments; omitted from the file when empty.
    pub args: Vec<String>,
    /// Environment variables; omitted from the file when empty.
    pub env: BTreeMap<String, String>,
}

impl ServerEntry {
    /// Builds the entry a client should hold for a canonical server.
    #[must_use]
    pub fn from_canonical(server: &CanonicalServer) -> Self {
        Self {
            command: server.command().to_owned(),
            args: server.args().to_vec(),
            env: server.env().clone(),
        }
    }

    /// Renders the entry as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("command".to_owned(), Value::String(self.command.clone()));
        if !self.args.is_empty() {
            object.insert(
                "args".to_owned(),
                Value::Array(self.args.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.env.is_empty() {
            object.insert(
                "env".to_owned(),
                Value::Object(
                    self.env
                        .iter()
                        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                        .collect(),
                ),
            );
        }
        Value::Object(object)
    }
}

impl From<&CanonicalServer> for ServerEntry {
    fn from(server: &CanonicalServer) -> Self {
        Self::from_canonical(server)
    }
}
