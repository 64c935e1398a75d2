//! Raw record decoding
//!
//! Both dialects hand back duck-typed JSON records whose field spellings
//! disagree (`name` vs `teamName`, `score` vs `points`, string vs numeric
//! ids). Decoding probes fixed fallback lists, first non-empty wins, and
//! records missing the essentials are dropped rather than erroring. Team
//! snapshots are re-ranked locally: score-descending with dense 1-based
//! positions.

use crate::data_fetcher::models::{Answer, GameSession, TaskDefinition, TeamResult};
use crate::data_fetcher::richtext;
use serde_json::Value;
use tracing::debug;

/// Decode a game record from either dialect's games endpoint
pub fn decode_game(record: &Value) -> Option<GameSession> {
    let id = string_field(record, &["id", "gameId", "game_id"])?;
    let name = string_field(record, &["name", "title"])
        .or_else(|| record.get("title").map(richtext::resolve_title))
        .unwrap_or_else(|| id.clone());
    Some(GameSession {
        id,
        name,
        logo_url: string_field(record, &["logoUrl", "logo", "imageUrl"]),
        intro: record.get("intro").and_then(richtext::resolve_text),
        outro: record.get("outro").and_then(richtext::resolve_text),
    })
}

/// Decode an authoritative task record. Title resolution falls through the
/// rich-text priority chain, so it is never empty.
pub fn decode_task(record: &Value) -> Option<TaskDefinition> {
    let id = string_field(record, &["id", "taskId", "questionId"])?;
    Some(TaskDefinition {
        id,
        title: richtext::resolve_title(record),
        kind: string_field(record, &["type", "kind"]).unwrap_or_else(|| "task".to_string()),
        raw: Some(record.clone()),
    })
}

/// Decode one answer record nested in a team's results
pub fn decode_answer(record: &Value) -> Option<Answer> {
    let task_id = string_field(record, &["taskId", "task_id", "questionId", "task"])?;
    Some(Answer {
        task_id,
        is_correct: bool_field(record, &["isCorrect", "correct"]),
        score: number_field(record, &["score", "points"]),
        raw: Some(record.clone()),
    })
}

/// Decode one team record; position is assigned later by `rank_teams`
pub fn decode_team(record: &Value) -> Option<TeamResult> {
    let name = string_field(record, &["name", "teamName", "title"])?;
    let answers = record
        .get("answers")
        .or_else(|| record.get("results"))
        .and_then(Value::as_array)
        .map(|records| records.iter().filter_map(decode_answer).collect())
        .unwrap_or_default();
    Some(TeamResult {
        position: 0,
        name,
        score: number_field(record, &["score", "points", "totalScore"]).unwrap_or(0.0),
        correct_answers: count_field(record, &["correctAnswers", "correct"]),
        incorrect_answers: count_field(record, &["incorrectAnswers", "incorrect", "wrong"]),
        color: string_field(record, &["color", "teamColor"]),
        answers,
    })
}

/// Decode a whole results snapshot and rank it
pub fn decode_results(records: &[Value]) -> Vec<TeamResult> {
    let teams: Vec<TeamResult> = records.iter().filter_map(decode_team).collect();
    let dropped = records.len() - teams.len();
    if dropped > 0 {
        debug!(dropped, "Dropped unnameable team records from snapshot");
    }
    rank_teams(teams)
}

/// Sort score-descending (stable, so upstream order breaks ties) and assign
/// dense 1-based positions.
pub fn rank_teams(mut teams: Vec<TeamResult>) -> Vec<TeamResult> {
    teams.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    for (index, team) in teams.iter_mut().enumerate() {
        team.position = index + 1;
    }
    teams
}

fn string_field(record: &Value, fields: &[&str]) -> Option<String> {
    for field in fields {
        match record.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn number_field(record: &Value, fields: &[&str]) -> Option<f64> {
    for field in fields {
        match record.get(field) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.trim().parse::<f64>() {
                    return Some(parsed);
                }
            }
            _ => {}
        }
    }
    None
}

fn count_field(record: &Value, fields: &[&str]) -> Option<u32> {
    number_field(record, fields).map(|n| n.max(0.0) as u32)
}

fn bool_field(record: &Value, fields: &[&str]) -> Option<bool> {
    for field in fields {
        if let Some(Value::Bool(b)) = record.get(field) {
            return Some(*b);
        }
    }
    None
}
