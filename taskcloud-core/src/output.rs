//! JSON shapes handed to the JS host.
//!
//! Every export returns one of these as a string. Failures never throw across
//! the boundary; they come back in the `error` field instead.

use serde::Serialize;

use crate::cloud::{CloudView, PlacedTask};
use crate::error::{Error, Result};
use crate::layout::{LayoutResult, LayoutWarning, Placement};
use crate::task::Crumb;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    /// Machine-readable, see `Error::kind`.
    pub kind: String,
    pub message: String,
}

impl From<&Error> for ErrorInfo {
    fn from(e: &Error) -> Self {
        ErrorInfo { kind: e.kind().to_string(), message: e.to_string() }
    }
}

/// Result of a stateless layout call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub placements: Vec<Placement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayoutWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl From<Result<LayoutResult>> for LayoutOutput {
    fn from(result: Result<LayoutResult>) -> Self {
        match result {
            Ok(r) => LayoutOutput { placements: r.placements, warnings: r.warnings, error: None },
            Err(e) => LayoutOutput { error: Some(ErrorInfo::from(&e)), ..LayoutOutput::default() },
        }
    }
}

/// Result of `TaskCloud::layout`: the current tier plus where it sits.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Crumb>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<PlacedTask>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayoutWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl From<Result<CloudView>> for ViewOutput {
    fn from(result: Result<CloudView>) -> Self {
        match result {
            Ok(v) => ViewOutput {
                breadcrumbs: v.breadcrumbs,
                tasks: v.tasks,
                warnings: v.warnings,
                error: None,
            },
            Err(e) => ViewOutput { error: Some(ErrorInfo::from(&e)), ..ViewOutput::default() },
        }
    }
}

/// Serialize for the host. These types only hold strings and finite numbers,
/// so the fallback is never expected to be hit.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("failed to serialize output: {e}");
        r#"{"error":{"kind":"json","message":"failed to serialize output"}}"#.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_success_omits_empty_fields() {
        let ok = LayoutOutput::from(Ok(LayoutResult {
            placements: vec![Placement { id: "a".to_string(), x: 1.0, y: 2.0, width: 3.0, height: 4.0 }],
            warnings: vec![],
        }));
        let v: Value = serde_json::from_str(&to_json(&ok)).unwrap();
        assert_eq!(
            v,
            json!({ "placements": [{ "id": "a", "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0 }] })
        );
    }

    #[test]
    fn test_error_carries_kind_and_message() {
        let out = LayoutOutput::from(Err(Error::MeasurementUnavailable("no canvas".to_string())));
        let v: Value = serde_json::from_str(&to_json(&out)).unwrap();
        assert_eq!(v["error"]["kind"], "measurement_unavailable");
        assert_eq!(v["error"]["message"], "text measurement unavailable: no canvas");
        assert!(v.get("placements").is_none());
    }

    #[test]
    fn test_warnings_are_tagged() {
        let out = LayoutOutput::from(Ok(LayoutResult {
            placements: vec![],
            warnings: vec![LayoutWarning::UnresolvedCollision { id: "b".to_string(), attempts: 3 }],
        }));
        let v: Value = serde_json::from_str(&to_json(&out)).unwrap();
        assert_eq!(v["warnings"][0]["kind"], "unresolved_collision");
        assert_eq!(v["warnings"][0]["id"], "b");
    }

    #[test]
    fn test_view_output_from_error() {
        let out = ViewOutput::from(Err(Error::NoChildren("x".to_string())));
        let v: Value = serde_json::from_str(&to_json(&out)).unwrap();
        assert_eq!(v, json!({ "error": { "kind": "no_children", "message": "task 'x' has no subtasks" } }));
    }
}
