use serde::{Deserialize, Serialize};

use crate::model::summary::MonthSummary;

/// Response body handed to report consumers.
///
/// Success: `{"success": true, "data": [...]}`.
/// Failure: `{"success": false, "message": "..."}`; no partial data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Vec<MonthSummary>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl ReportResponse {
    pub fn ok(data: Vec<MonthSummary>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl From<anyhow::Result<Vec<MonthSummary>>> for ReportResponse {
    fn from(result: anyhow::Result<Vec<MonthSummary>>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failure(format!("Error fetching maintenance analytics data: {:#}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_success_shape() {
        let json = serde_json::to_value(ReportResponse::ok(Vec::new())).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": []}));
    }

    #[test]
    fn test_failure_shape() {
        let response = ReportResponse::from(Err::<Vec<MonthSummary>, _>(anyhow!("boom")));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "message": "Error fetching maintenance analytics data: boom"
            })
        );
    }
}
