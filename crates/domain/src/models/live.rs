//! Live domain models.
//!
//! A live has one host group and a style describing who performs:
//! `oneman` (the host alone), `battle` (a few groups), or `festival`
//! (many groups). `LiveStyle` is generic over the performer
//! representation so the same shape serves declared ids on input and
//! resolved performer info on output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::CoordinationError;

/// Style of a live, carrying its declared performers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum LiveStyle<P> {
    Oneman { performer: P },
    Battle { performers: Vec<P> },
    Festival { performers: Vec<P> },
}

/// Style discriminant without performers, as persisted on the live row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStyleKind {
    Oneman,
    Battle,
    Festival,
}

impl<P> LiveStyle<P> {
    /// The persisted discriminant for this style.
    pub fn kind(&self) -> LiveStyleKind {
        match self {
            LiveStyle::Oneman { .. } => LiveStyleKind::Oneman,
            LiveStyle::Battle { .. } => LiveStyleKind::Battle,
            LiveStyle::Festival { .. } => LiveStyleKind::Festival,
        }
    }

    /// All declared performers, in declaration order.
    pub fn performers(&self) -> Vec<&P> {
        match self {
            LiveStyle::Oneman { performer } => vec![performer],
            LiveStyle::Battle { performers } | LiveStyle::Festival { performers } => {
                performers.iter().collect()
            }
        }
    }
}

impl LiveStyleKind {
    /// Rebuilds a style from its discriminant and resolved performers.
    ///
    /// `others` is ignored for `oneman`, which performs host-only by
    /// definition.
    pub fn with_performers<P>(self, host: P, others: Vec<P>) -> LiveStyle<P> {
        match self {
            LiveStyleKind::Oneman => LiveStyle::Oneman { performer: host },
            LiveStyleKind::Battle => {
                let mut performers = vec![host];
                performers.extend(others);
                LiveStyle::Battle { performers }
            }
            LiveStyleKind::Festival => {
                let mut performers = vec![host];
                performers.extend(others);
                LiveStyle::Festival { performers }
            }
        }
    }
}

impl std::fmt::Display for LiveStyleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveStyleKind::Oneman => write!(f, "oneman"),
            LiveStyleKind::Battle => write!(f, "battle"),
            LiveStyleKind::Festival => write!(f, "festival"),
        }
    }
}

impl LiveStyle<Uuid> {
    /// Validates declared performer ids against the host group, before any
    /// write.
    ///
    /// A `oneman` live must declare exactly the host group. For `battle`
    /// and `festival`, a duplicate non-host entry is rejected because it
    /// would violate the (live, group) uniqueness of performance requests;
    /// repeated host mentions are harmless since the host row is inserted
    /// exactly once.
    pub fn validate_for_host(&self, host_group_id: Uuid) -> Result<(), CoordinationError> {
        match self {
            LiveStyle::Oneman { performer } => {
                if *performer != host_group_id {
                    return Err(CoordinationError::InvalidInput(
                        "A oneman live's performer must be the host group".to_string(),
                    ));
                }
            }
            LiveStyle::Battle { performers } | LiveStyle::Festival { performers } => {
                if performers.is_empty() {
                    return Err(CoordinationError::InvalidInput(
                        "At least one performer must be declared".to_string(),
                    ));
                }
                let mut seen = std::collections::HashSet::new();
                for id in performers {
                    if *id != host_group_id && !seen.insert(*id) {
                        return Err(CoordinationError::InvalidInput(format!(
                            "Duplicate performer group: {id}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Distinct declared performers other than the host, in declaration
    /// order. These become pending performance requests.
    pub fn guest_performer_ids(&self, host_group_id: Uuid) -> Vec<Uuid> {
        let mut seen = std::collections::HashSet::new();
        self.performers()
            .into_iter()
            .copied()
            .filter(|id| *id != host_group_id && seen.insert(*id))
            .collect()
    }
}

/// A live as stored. Performers live in their own tables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Live {
    pub id: Uuid,
    pub title: String,
    pub style: LiveStyleKind,
    pub host_group_id: Uuid,
    pub author_id: Uuid,
    pub venue: Option<String>,
    pub artwork_url: Option<String>,
    pub opens_at: Option<DateTime<Utc>>,
    pub starts_at: DateTime<Utc>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a live.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateLiveRequest {
    pub host_group_id: Uuid,

    #[serde(flatten)]
    pub style: LiveStyle<Uuid>,

    #[validate(custom(function = "shared::validation::validate_title"))]
    pub title: String,

    #[validate(length(max = 200, message = "Venue must be at most 200 characters"))]
    pub venue: Option<String>,

    pub artwork_url: Option<String>,

    pub opens_at: Option<DateTime<Utc>>,

    pub starts_at: DateTime<Utc>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: i64,
}

/// Request to edit a live's descriptive fields.
///
/// Style, host, and the performer set are fixed at creation and cannot be
/// edited.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct EditLiveRequest {
    #[validate(custom(function = "shared::validation::validate_title"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Venue must be at most 200 characters"))]
    pub venue: Option<String>,

    pub artwork_url: Option<String>,

    pub opens_at: Option<DateTime<Utc>>,

    pub starts_at: Option<DateTime<Utc>>,
}

/// A performer resolved to displayable group info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PerformerInfo {
    pub id: Uuid,
    pub name: String,
}

/// A performance request as seen in a live detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RequestSummary {
    pub id: Uuid,
    pub group: PerformerInfo,
    pub status: super::performance_request::RequestStatus,
}

/// Live detail with the declared performer set resolved to group names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LiveResponse {
    pub id: Uuid,
    pub title: String,
    pub host_group_id: Uuid,
    pub author_id: Uuid,
    pub venue: Option<String>,
    pub artwork_url: Option<String>,
    pub opens_at: Option<DateTime<Utc>>,
    pub starts_at: DateTime<Utc>,
    pub price: i64,
    #[serde(flatten)]
    pub style: LiveStyle<PerformerInfo>,
    pub performance_requests: Vec<RequestSummary>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_oneman_performer_must_be_host() {
        let style = LiveStyle::Oneman { performer: uuid(2) };
        let err = style.validate_for_host(uuid(1)).unwrap_err();
        assert!(matches!(err, CoordinationError::InvalidInput(_)));

        let style = LiveStyle::Oneman { performer: uuid(1) };
        assert!(style.validate_for_host(uuid(1)).is_ok());
    }

    #[test]
    fn test_battle_rejects_duplicate_guests() {
        let style = LiveStyle::Battle {
            performers: vec![uuid(1), uuid(2), uuid(2)],
        };
        let err = style.validate_for_host(uuid(1)).unwrap_err();
        assert!(matches!(err, CoordinationError::InvalidInput(_)));
    }

    #[test]
    fn test_battle_tolerates_repeated_host_mentions() {
        let style = LiveStyle::Battle {
            performers: vec![uuid(1), uuid(1), uuid(2)],
        };
        assert!(style.validate_for_host(uuid(1)).is_ok());
        assert_eq!(style.guest_performer_ids(uuid(1)), vec![uuid(2)]);
    }

    #[test]
    fn test_festival_rejects_empty_performers() {
        let style: LiveStyle<Uuid> = LiveStyle::Festival { performers: vec![] };
        assert!(style.validate_for_host(uuid(1)).is_err());
    }

    #[test]
    fn test_guest_performer_ids_excludes_host() {
        let style = LiveStyle::Festival {
            performers: vec![uuid(1), uuid(2), uuid(3)],
        };
        assert_eq!(
            style.guest_performer_ids(uuid(1)),
            vec![uuid(2), uuid(3)]
        );
    }

    #[test]
    fn test_style_kind() {
        let style = LiveStyle::Oneman { performer: uuid(1) };
        assert_eq!(style.kind(), LiveStyleKind::Oneman);
        assert_eq!(LiveStyleKind::Battle.to_string(), "battle");
    }

    #[test]
    fn test_with_performers_oneman_is_host_only() {
        let host = PerformerInfo {
            id: uuid(1),
            name: "Host".into(),
        };
        let guest = PerformerInfo {
            id: uuid(2),
            name: "Guest".into(),
        };
        let style = LiveStyleKind::Oneman.with_performers(host.clone(), vec![guest]);
        assert_eq!(style.performers(), vec![&host]);
    }

    #[test]
    fn test_style_serde_shape() {
        let style = LiveStyle::Battle {
            performers: vec![uuid(1), uuid(2)],
        };
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["style"], "battle");
        assert!(json["performers"].is_array());

        let parsed: LiveStyle<Uuid> = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, style);
    }

    #[test]
    fn test_create_live_request_deserializes_flattened_style() {
        let json = serde_json::json!({
            "host_group_id": uuid(1),
            "style": "oneman",
            "performer": uuid(1),
            "title": "Solo Night",
            "starts_at": "2026-10-01T19:00:00Z",
            "price": 3000
        });
        let request: CreateLiveRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.style.kind(), LiveStyleKind::Oneman);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_live_request_rejects_negative_price() {
        let request = CreateLiveRequest {
            host_group_id: uuid(1),
            style: LiveStyle::Oneman { performer: uuid(1) },
            title: "Solo Night".into(),
            venue: None,
            artwork_url: None,
            opens_at: None,
            starts_at: Utc::now(),
            price: -500,
        };
        assert!(request.validate().is_err());
    }
}
