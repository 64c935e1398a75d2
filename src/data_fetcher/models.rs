use serde::{Deserialize, Serialize};

/// A game selected for display. Fetched once per game selection and held
/// until the selection changes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameSession {
    pub id: String,
    pub name: String,
    #[serde(rename = "logoUrl", default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub outro: Option<String>,
}

/// One entry in the reconciled task catalog.
///
/// Authoritative entries come from a tasks endpoint and keep their upstream
/// kind tag; synthetic entries are inferred purely from an answer reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub id: String,
    pub title: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

/// Kind tag assigned to tasks that exist only as answer references
pub const SYNTHETIC_TASK_KIND: &str = "synthetic";

impl TaskDefinition {
    /// Build a placeholder for a task id that appears in answers but not in
    /// the authoritative catalog. The id doubles as the display title.
    pub fn synthetic(task_id: impl Into<String>) -> Self {
        let id = task_id.into();
        Self {
            title: id.clone(),
            id,
            kind: SYNTHETIC_TASK_KIND.to_string(),
            raw: None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.kind == SYNTHETIC_TASK_KIND
    }
}

/// A single team's answer to one task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "taskId")]
    pub task_id: String,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

/// One team's standing within a snapshot. Positions are dense, 1-based and
/// unique; snapshots are replaced wholesale on every poll tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResult {
    pub position: usize,
    pub name: String,
    pub score: f64,
    #[serde(rename = "correctAnswers", default)]
    pub correct_answers: Option<u32>,
    #[serde(rename = "incorrectAnswers", default)]
    pub incorrect_answers: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// A harvested media reference. `url` is the deduplication key: no two
/// photos in a returned collection share one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "teamName", default)]
    pub team_name: Option<String>,
    #[serde(rename = "taskTitle", default)]
    pub task_title: Option<String>,
    #[serde(default)]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

/// Fire-and-forget notification raised when the observed answer total grows
/// between polls. Display lifetime belongs to the consumer; see
/// `constants::notification::DISPLAY_SECONDS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveUpdate {
    pub message: String,
    pub subtext: String,
    pub delta: u64,
}

impl LiveUpdate {
    pub fn from_delta(delta: u64) -> Self {
        let message = if delta == 1 {
            "New answer received!".to_string()
        } else {
            format!("{delta} new answers received!")
        };
        Self {
            message,
            subtext: "Scoreboard updated".to_string(),
            delta,
        }
    }
}

/// Everything the presentation layer consumes for one loaded game
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    pub game: GameSession,
    pub tasks: Vec<TaskDefinition>,
    pub teams: Vec<TeamResult>,
}

impl Scoreboard {
    /// Total answer count across all teams; the quantity the poll diff
    /// tracker observes.
    pub fn total_answer_count(&self) -> u64 {
        self.teams.iter().map(|t| t.answers.len() as u64).sum()
    }
}
