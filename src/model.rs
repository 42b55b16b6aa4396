// src/model.rs
use serde::Deserialize;
use serde_json::{Map, Value};

pub const NO_PARTICIPANTS_TEXT: &str = "No participants yet";

/// One activity as the server reported it in the last snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

// Wire shape of a single entry in `GET /activities`. The name is the map key.
#[derive(Debug, Deserialize)]
struct ActivityDetails {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    schedule: Option<String>,
    #[serde(default)]
    max_participants: u32,
    #[serde(default)]
    participants: Option<Vec<String>>,
}

impl Activity {
    fn from_details(name: String, d: ActivityDetails) -> Self {
        Self {
            name,
            description: d.description.unwrap_or_default(),
            schedule: d.schedule.unwrap_or_default(),
            max_participants: d.max_participants,
            participants: d.participants.unwrap_or_default(),
        }
    }

    /// Capacity minus roster size. Negative when the server over-filled.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }

    pub fn roster(&self) -> Roster {
        if self.participants.is_empty() {
            return Roster::Empty;
        }
        Roster::Members(
            self.participants
                .iter()
                .map(|p| RosterEntry {
                    identifier: p.clone(),
                    initials: initials(p),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub identifier: String,
    pub initials: String,
}

/// What the participant sub-list of a card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Roster {
    Empty,
    Members(Vec<RosterEntry>),
}

/// Decode the `GET /activities` body, keeping the object's key order.
pub fn decode_snapshot(body: &str) -> Result<Vec<Activity>, serde_json::Error> {
    let entries: Map<String, Value> = serde_json::from_str(body)?;
    entries
        .into_iter()
        .map(|(name, v)| {
            let details: ActivityDetails = serde_json::from_value(v)?;
            Ok(Activity::from_details(name, details))
        })
        .collect()
}

/// Badge text for a participant: "jane.doe@x" -> "JD", "" -> "?".
pub fn initials(identifier: &str) -> String {
    let local = identifier.split('@').next().unwrap_or_default();
    let out: String = local
        .split(|c: char| matches!(c, '.' | '-' | '_' | ' '))
        .filter(|seg| !seg.is_empty())
        .take(2)
        .filter_map(|seg| seg.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if out.is_empty() {
        "?".to_string()
    } else {
        out
    }
}
