use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;
use crate::resource::{Draft, EntityId, Resource};

/// Display color for statuses the table does not recognize
pub const NEUTRAL_STATUS_COLOR: &str = "#95a5a6";

/// Fulfillment status of a hospital request. Like [`UnitStatus`], the status
/// select offers every value and no transition graph is enforced.
///
/// [`UnitStatus`]: super::blood_unit::UnitStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Processing,
    Approved,
    Transit,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::Pending,
        RequestStatus::Processing,
        RequestStatus::Approved,
        RequestStatus::Transit,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Processing => "Processing",
            RequestStatus::Approved => "Approved",
            RequestStatus::Transit => "Transit",
            RequestStatus::Completed => "Completed",
            RequestStatus::Cancelled => "Cancelled",
        }
    }

    /// Human label for filter options
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Transit => "In Transit",
            other => other.as_str(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "#f39c12",
            RequestStatus::Processing => "#3498db",
            RequestStatus::Approved => "#27ae60",
            RequestStatus::Transit => "#9b59b6",
            RequestStatus::Completed => "#27ae60",
            RequestStatus::Cancelled => "#e74c3c",
        }
    }

    /// Pending and processing requests are highlighted as urgent rows
    pub fn is_urgent(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Processing)
    }

    /// Unconstrained: every target status is reachable from every status.
    pub fn transition(self, to: RequestStatus) -> RequestStatus {
        to
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::RequestStatus(s.to_string()))
    }
}

/// Color lookup over a raw status label; unknown labels render gray.
pub fn status_color(status: &str) -> &'static str {
    status
        .parse::<RequestStatus>()
        .map(|s| s.color())
        .unwrap_or(NEUTRAL_STATUS_COLOR)
}

/// A hospital's request for a specific unit. Named `BloodRequest` to keep it
/// apart from HTTP request types; the backend collection is `requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub request_id: EntityId,
    pub hospital_id: EntityId,
    pub unit_id: EntityId,
    pub request_date: NaiveDate,
    pub req_status: RequestStatus,
    /// Set when the request reaches `Completed`
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
}

impl BloodRequest {
    /// Draft for the inline status select.
    ///
    /// Moving to `Completed` stamps `today` as the completed date. Any other
    /// status keeps whatever completed date the request already had.
    pub fn with_status(&self, status: RequestStatus, today: NaiveDate) -> BloodRequestDraft {
        let req_status = self.req_status.transition(status);
        let completed_date = if req_status == RequestStatus::Completed {
            Some(today)
        } else {
            self.completed_date
        };

        BloodRequestDraft {
            req_status,
            completed_date,
            ..self.draft()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodRequestDraft {
    pub hospital_id: Option<EntityId>,
    pub unit_id: Option<EntityId>,
    pub request_date: Option<NaiveDate>,
    pub req_status: RequestStatus,
    pub completed_date: Option<NaiveDate>,
}

impl Draft for BloodRequestDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.hospital_id.is_none() {
            missing.push("hospital_id");
        }
        if self.unit_id.is_none() {
            missing.push("unit_id");
        }
        if self.request_date.is_none() {
            missing.push("request_date");
        }
        missing
    }
}

impl Resource for BloodRequest {
    type Draft = BloodRequestDraft;

    const COLLECTION: &'static str = "requests";
    const LABEL: &'static str = "request";

    fn id(&self) -> EntityId {
        self.request_id
    }

    fn draft(&self) -> BloodRequestDraft {
        BloodRequestDraft {
            hospital_id: Some(self.hospital_id),
            unit_id: Some(self.unit_id),
            request_date: Some(self.request_date),
            req_status: self.req_status,
            completed_date: self.completed_date,
        }
    }

    /// New requests are dated today and start out pending
    fn new_draft(today: NaiveDate) -> BloodRequestDraft {
        BloodRequestDraft {
            request_date: Some(today),
            ..BloodRequestDraft::default()
        }
    }
}

/// Number of requests currently in `status`
pub fn count_with_status(requests: &[BloodRequest], status: RequestStatus) -> usize {
    requests.iter().filter(|r| r.req_status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(status: RequestStatus, completed: Option<NaiveDate>) -> BloodRequest {
        BloodRequest {
            request_id: 7,
            hospital_id: 2,
            unit_id: 10,
            request_date: date(2025, 11, 20),
            req_status: status,
            completed_date: completed,
        }
    }

    #[test]
    fn test_completing_stamps_today() {
        let today = date(2025, 12, 1);
        let draft = request(RequestStatus::Transit, None).with_status(RequestStatus::Completed, today);

        assert_eq!(draft.req_status, RequestStatus::Completed);
        assert_eq!(draft.completed_date, Some(today));
        assert_eq!(draft.hospital_id, Some(2));
        assert_eq!(draft.unit_id, Some(10));
    }

    #[test]
    fn test_other_status_keeps_completed_date() {
        let earlier = date(2025, 11, 28);
        let draft = request(RequestStatus::Completed, Some(earlier))
            .with_status(RequestStatus::Cancelled, date(2025, 12, 1));

        assert_eq!(draft.req_status, RequestStatus::Cancelled);
        assert_eq!(draft.completed_date, Some(earlier));

        let draft = request(RequestStatus::Pending, None)
            .with_status(RequestStatus::Approved, date(2025, 12, 1));
        assert_eq!(draft.completed_date, None);
    }

    #[test]
    fn test_status_colors_with_gray_fallback() {
        assert_eq!(status_color("Pending"), "#f39c12");
        assert_eq!(status_color("Cancelled"), "#e74c3c");
        assert_eq!(status_color("Lost"), NEUTRAL_STATUS_COLOR);
        assert_eq!(status_color(""), NEUTRAL_STATUS_COLOR);
    }

    #[test]
    fn test_urgent_statuses() {
        let urgent: Vec<_> = RequestStatus::ALL.into_iter().filter(|s| s.is_urgent()).collect();
        assert_eq!(urgent, vec![RequestStatus::Pending, RequestStatus::Processing]);
    }

    #[test]
    fn test_new_draft_dated_today() {
        let today = date(2025, 12, 1);
        let draft = BloodRequest::new_draft(today);
        assert_eq!(draft.request_date, Some(today));
        assert_eq!(draft.req_status, RequestStatus::Pending);
        assert_eq!(draft.missing_fields(), vec!["hospital_id", "unit_id"]);
    }

    #[test]
    fn test_count_with_status() {
        let requests = vec![
            request(RequestStatus::Pending, None),
            request(RequestStatus::Pending, None),
            request(RequestStatus::Completed, Some(date(2025, 12, 1))),
        ];
        assert_eq!(count_with_status(&requests, RequestStatus::Pending), 2);
        assert_eq!(count_with_status(&requests, RequestStatus::Transit), 0);
    }
}
