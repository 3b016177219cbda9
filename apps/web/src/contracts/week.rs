use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::entry::AdminEntry;

/// The week currently being voted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThisWeek {
    pub entries: Vec<AdminEntry>,
    pub theme: String,
    pub date: String,
    pub voting_open: bool,
}

/// The week currently accepting submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextWeek {
    pub entries: Vec<AdminEntry>,
    pub theme: String,
    pub date: String,
    pub submissions_open: bool,
}

/// A voter who has submitted ratings this week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(
        rename = "userID",
        serialize_with = "user_id_as_string",
        deserialize_with = "user_id_from_number_or_string"
    )]
    pub user_id: u64,
    #[serde(rename = "userName")]
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminData {
    pub votes: Vec<Vote>,
    /// Always `(current week, next week)`.
    pub weeks: (ThisWeek, NextWeek),
}

impl AdminData {
    pub fn this_week(&self) -> &ThisWeek {
        &self.weeks.0
    }

    pub fn next_week(&self) -> &NextWeek {
        &self.weeks.1
    }
}

// Discord snowflakes overflow a JS number, so the backend sends them as strings.
fn user_id_as_string<S>(id: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_string())
}

fn user_id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .parse()
            .map_err(|_| de::Error::custom(format!("userID '{text}' is not numeric"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn week(flag: &str) -> serde_json::Value {
        let mut week = json!({
            "entries": [],
            "theme": "Week 12: Canon",
            "date": "March 4th 2024"
        });
        week[flag] = json!(true);
        week
    }

    #[test]
    fn test_vote_accepts_string_and_number_ids() {
        let from_string: Vote =
            serde_json::from_value(json!({"userID": "336685325231325184", "userName": "wilm0x42"}))
                .unwrap();
        let from_number: Vote =
            serde_json::from_value(json!({"userID": 336685325231325184u64, "userName": "wilm0x42"}))
                .unwrap();
        assert_eq!(from_string, from_number);
        assert_eq!(from_string.user_id, 336685325231325184);
    }

    #[test]
    fn test_vote_rejects_non_numeric_id() {
        let result = serde_json::from_value::<Vote>(json!({"userID": "wiggle", "userName": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_vote_serializes_id_as_string() {
        let vote = Vote {
            user_id: 156896959783895040,
            user_name: "wiggle".to_string(),
        };
        let value = serde_json::to_value(&vote).unwrap();
        assert_eq!(value["userID"], json!("156896959783895040"));
    }

    #[test]
    fn test_weeks_are_ordered_this_then_next() {
        let data: AdminData = serde_json::from_value(json!({
            "votes": [],
            "weeks": [week("votingOpen"), week("submissionsOpen")]
        }))
        .unwrap();
        assert!(data.this_week().voting_open);
        assert!(data.next_week().submissions_open);
    }

    #[test]
    fn test_weeks_missing_flag_is_rejected() {
        let result = serde_json::from_value::<AdminData>(json!({
            "votes": [],
            "weeks": [week("submissionsOpen"), week("submissionsOpen")]
        }));
        assert!(result.is_err());
    }
}
