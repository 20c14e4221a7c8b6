use chrono::NaiveDate;
use chrono::NaiveDateTime;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::utils::time::parse_timestamp;

pub const DEFAULT_WATER_GOAL: i64 = 64;
pub const DEFAULT_DAILY_DOSAGE: i64 = 1;

/// Reason prefix marking an audit entry as a dose being taken.
pub const TAKE_REASON_PREFIX: &str = "took";

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct FocusSession {
    pub task: String,
    pub minutes: i64,
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct MoodEntry {
    pub rating: u8,
    #[serde(default)]
    pub note: String,
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
}

/// Water intake in ounces. The key on disk says millilitres because files from the first
/// version of the tool were written that way, the value has always been ounces.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct WaterEntry {
    #[serde(rename = "amount_ml", alias = "amount")]
    pub amount: i64,
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
}

/// The only piece of the document that is overwritten in place instead of appended to.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct VyvanseState {
    /// Goes below zero when more doses are logged than were in stock.
    pub pill_count: i64,
    pub daily_dosage: i64,
    pub refill_date: NaiveDate,
}

impl VyvanseState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            pill_count: 0,
            daily_dosage: DEFAULT_DAILY_DOSAGE,
            refill_date: today,
        }
    }

    pub fn needs_refill(&self) -> bool {
        self.pill_count <= 0
    }
}

/// Audit trail entry for pill state changes.
///
/// `change` holds the daily dosage at the time of the event, not the number of pills the event
/// added or removed. Existing files rely on that meaning so it is kept as is.
///
/// The timestamp is kept as written. A damaged one shouldn't make the whole document unreadable,
/// it only means the entry can't be used to estimate the dose phase.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct VyvanseLogEntry {
    pub change: i64,
    pub reason: String,
    pub timestamp: String,
}

impl VyvanseLogEntry {
    pub fn is_take(&self) -> bool {
        self.reason.starts_with(TAKE_REASON_PREFIX)
    }

    pub fn logged_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct HempEntry {
    pub amount_mg: i64,
    #[serde(default)]
    pub feeling: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct SubstanceEntry {
    pub name: String,
    /// Free-form, e.g. "2 cups" or "1 tab".
    pub amount: String,
    #[serde(default)]
    pub feeling: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
}

/// Everything chaoscatcher tracks. It's read from disk as a whole and written back as a whole.
#[derive(PartialEq, Debug, Serialize, Clone)]
pub struct Document {
    pub focus_sessions: Vec<FocusSession>,
    pub moods: Vec<MoodEntry>,
    pub water: Vec<WaterEntry>,
    pub vyvanse: VyvanseState,
    pub vyvanse_log: Vec<VyvanseLogEntry>,
    pub hemp: Vec<HempEntry>,
    pub substances: Vec<SubstanceEntry>,
    pub water_goal: i64,
    /// Keys this version doesn't know about. Kept so that saving doesn't drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focus_sessions: vec![],
            moods: vec![],
            water: vec![],
            vyvanse: VyvanseState::new(today),
            vyvanse_log: vec![],
            hemp: vec![],
            substances: vec![],
            water_goal: DEFAULT_WATER_GOAL,
            extra: Map::new(),
        }
    }

    /// Parses a stored document, filling in keys that older files don't have.
    pub fn from_json(contents: &[u8], today: NaiveDate) -> serde_json::Result<Self> {
        let stored: StoredDocument = serde_json::from_slice(contents)?;
        Ok(stored.into_document(today))
    }
}

/// Shape of the document as found on disk. Any key may be missing in files written by older
/// versions, [StoredDocument::into_document] fills them in.
#[derive(Debug, Deserialize)]
struct StoredDocument {
    #[serde(default)]
    focus_sessions: Vec<FocusSession>,
    #[serde(default)]
    moods: Vec<MoodEntry>,
    #[serde(default)]
    water: Vec<WaterEntry>,
    #[serde(default)]
    vyvanse: Option<VyvanseState>,
    #[serde(default)]
    vyvanse_log: Vec<VyvanseLogEntry>,
    #[serde(default)]
    hemp: Vec<HempEntry>,
    #[serde(default)]
    substances: Vec<SubstanceEntry>,
    #[serde(default)]
    water_goal: Option<i64>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl StoredDocument {
    fn into_document(self, today: NaiveDate) -> Document {
        Document {
            focus_sessions: self.focus_sessions,
            moods: self.moods,
            water: self.water,
            vyvanse: self.vyvanse.unwrap_or_else(|| VyvanseState::new(today)),
            vyvanse_log: self.vyvanse_log,
            hemp: self.hemp,
            substances: self.substances,
            water_goal: self.water_goal.unwrap_or(DEFAULT_WATER_GOAL),
            extra: self.extra,
        }
    }
}

mod minute_timestamp {
    use chrono::NaiveDateTime;
    use serde::{self, de::Error, Deserialize, Deserializer, Serializer};

    use crate::utils::time::{format_timestamp, parse_timestamp};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(*timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).ok_or_else(|| D::Error::custom(format!("invalid timestamp {s:?}")))
    }
}
