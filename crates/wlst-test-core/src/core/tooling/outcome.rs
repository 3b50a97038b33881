use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::errors::{ErrorKind, WlstTestError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: CommandStatus,
    pub message: String,
    #[serde(default)]
    pub details: Value,
}

impl ExecutionOutcome {
    pub fn success(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: message.into(),
            details,
        }
    }

    pub fn failure(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Failure,
            message: message.into(),
            details,
        }
    }

    pub fn user_error(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::UserError,
            message: message.into(),
            details,
        }
    }

    /// Configuration errors become user errors; everything else is a failure.
    #[must_use]
    pub fn from_error(err: &WlstTestError) -> Self {
        let message = err.to_string();
        let details = err.details();
        match err.kind() {
            ErrorKind::Configuration => Self::user_error(message, details),
            ErrorKind::Execution => Self::failure(message, details),
        }
    }

    /// Adds `key` to the details object, wrapping non-object details first.
    pub fn insert_detail(&mut self, key: &str, value: Value) {
        match &mut self.details {
            Value::Object(map) => {
                map.insert(key.into(), value);
            }
            Value::Null => {
                let mut map = Map::new();
                map.insert(key.into(), value);
                self.details = Value::Object(map);
            }
            other => {
                let mut map = Map::new();
                map.insert("value".into(), other.take());
                map.insert(key.into(), value);
                self.details = Value::Object(map);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    UserError,
    Failure,
}

impl CommandStatus {
    /// Process exit code the CLI reports for this status.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::UserError => 1,
            Self::Failure => 2,
        }
    }
}

/// `wlst-test <command>: <message>`, unless the message already carries the prefix.
#[must_use]
pub fn format_status_message(command: &str, message: &str) -> String {
    let prefix = format!("wlst-test {command}");
    if message.is_empty() {
        prefix
    } else if message.starts_with(&prefix) {
        message.to_string()
    } else {
        format!("{prefix}: {message}")
    }
}

/// The `{status, message, details}` envelope printed by `--json`.
#[must_use]
pub fn to_json_response(command: &str, outcome: &ExecutionOutcome) -> Value {
    let status = match outcome.status {
        CommandStatus::Ok => "ok",
        CommandStatus::UserError => "user-error",
        CommandStatus::Failure => "error",
    };
    let details = match &outcome.details {
        Value::Object(_) => outcome.details.clone(),
        Value::Null => json!({}),
        other => json!({ "value": other }),
    };
    json!({
        "status": status,
        "message": format_status_message(command, &outcome.message),
        "details": details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn configuration_errors_are_user_errors() {
        let outcome = ExecutionOutcome::from_error(&WlstTestError::InvalidVerbosity { value: 5 });
        assert_eq!(outcome.status, CommandStatus::UserError);
        assert_eq!(outcome.status.exit_code(), 1);
        assert_eq!(outcome.details["code"], "WLSTTEST-019");
    }

    #[test]
    fn execution_errors_are_failures() {
        let outcome = ExecutionOutcome::from_error(&WlstTestError::Launch {
            program: PathBuf::from("/opt/wls/common/bin/wlst.sh"),
            source: anyhow::anyhow!("permission denied"),
        });
        assert_eq!(outcome.status, CommandStatus::Failure);
        assert_eq!(outcome.status.exit_code(), 2);
        assert!(outcome.message.contains("permission denied"));
    }

    #[test]
    fn insert_detail_wraps_scalars() {
        let mut outcome = ExecutionOutcome::success("ok", json!(3));
        outcome.insert_detail("stage", json!("succeeded"));
        assert_eq!(outcome.details, json!({ "value": 3, "stage": "succeeded" }));
    }

    #[test]
    fn json_envelope_uses_kebab_status_and_object_details() {
        let outcome = ExecutionOutcome::user_error("[WLSTTEST-019] bad", Value::Null);
        let payload = to_json_response("test", &outcome);
        assert_eq!(payload["status"], "user-error");
        assert_eq!(payload["message"], "wlst-test test: [WLSTTEST-019] bad");
        assert_eq!(payload["details"], json!({}));
    }

    #[test]
    fn status_prefix_is_not_repeated() {
        assert_eq!(format_status_message("plan", ""), "wlst-test plan");
        assert_eq!(
            format_status_message("plan", "wlst-test plan: done"),
            "wlst-test plan: done"
        );
    }
}
