//! Photo harvesting across dedicated endpoints and answer payloads
//!
//! Media references are scattered: some live behind photo endpoints, some
//! only inside arbitrary fields of raw answer payloads. Both sources are
//! mapped through fixed field-name fallback lists and merged with
//! first-occurrence-wins deduplication by resolved URL. Records without a
//! resolvable URL are dropped silently.

use crate::data_fetcher::models::{Photo, TeamResult};
use crate::data_fetcher::richtext;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Field names that may carry the full-size image URL, first non-empty wins
const URL_FIELDS: [&str; 5] = ["url", "imageUrl", "photoUrl", "image", "file"];

/// Field names that may carry a thumbnail URL
const THUMBNAIL_FIELDS: [&str; 4] = ["thumbnailUrl", "thumbUrl", "thumbnail", "previewUrl"];

/// Field names that may carry the owning team's name
const TEAM_FIELDS: [&str; 3] = ["teamName", "team", "teamTitle"];

/// Field names that may carry a capture timestamp
const TIMESTAMP_FIELDS: [&str; 3] = ["createdAt", "timestamp", "time"];

/// Fields scanned inside raw answer payloads for embedded image references
const ANSWER_IMAGE_FIELDS: [&str; 7] = [
    "photoUrl",
    "imageUrl",
    "image",
    "attachment",
    "media",
    "answer",
    "value",
];

/// Harvest photos from dedicated endpoint records and from answer payloads,
/// deduplicated by URL with first occurrence winning. Dedicated sources are
/// consumed in the given order and always beat answer-derived photos for the
/// same URL.
pub fn collect_photos(dedicated_sources: &[Vec<Value>], team_results: &[TeamResult]) -> Vec<Photo> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut photos = Vec::new();

    for source in dedicated_sources {
        for record in source {
            let Some(photo) = photo_from_record(record) else {
                debug!("Discarding photo record without resolvable url");
                continue;
            };
            if seen_urls.insert(photo.url.clone()) {
                photos.push(photo);
            }
        }
    }

    for team in team_results {
        for answer in &team.answers {
            let Some(raw) = answer.raw.as_ref() else {
                continue;
            };
            let Some(url) = image_from_answer(raw) else {
                continue;
            };
            if !seen_urls.insert(url.clone()) {
                continue;
            }
            photos.push(Photo {
                id: format!("answer-{}-{}", team.name, answer.task_id),
                url,
                thumbnail_url: None,
                team_name: Some(team.name.clone()),
                task_title: None,
                timestamp: first_timestamp(raw),
            });
        }
    }

    photos
}

/// Map one dedicated-endpoint record into a Photo, if a URL resolves
fn photo_from_record(record: &Value) -> Option<Photo> {
    let url = first_string(record, &URL_FIELDS)?;
    let id = match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => url.clone(),
    };
    let task_title = record
        .get("task")
        .map(richtext::resolve_title)
        .or_else(|| first_string(record, &["taskTitle", "taskName"]));
    Some(Photo {
        id,
        url,
        thumbnail_url: first_string(record, &THUMBNAIL_FIELDS),
        team_name: first_string(record, &TEAM_FIELDS),
        task_title,
        timestamp: first_timestamp(record),
    })
}

/// Scan an answer's raw payload for an image-like value: the fixed field
/// list first, then the literal answer value itself.
fn image_from_answer(raw: &Value) -> Option<String> {
    for field in ANSWER_IMAGE_FIELDS {
        if let Some(Value::String(s)) = raw.get(field)
            && looks_like_image(s)
        {
            return Some(s.clone());
        }
    }
    if let Value::String(s) = raw
        && looks_like_image(s)
    {
        return Some(s.clone());
    }
    None
}

/// URL-ish or embedded-data values count as images
fn looks_like_image(value: &str) -> bool {
    let v = value.trim();
    v.starts_with("http://") || v.starts_with("https://") || v.starts_with("data:image/")
}

fn first_string(record: &Value, fields: &[&str]) -> Option<String> {
    for field in fields {
        if let Some(Value::String(s)) = record.get(field) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn first_timestamp(record: &Value) -> Option<DateTime<Utc>> {
    let raw = first_string(record, &TIMESTAMP_FIELDS)?;
    DateTime::parse_from_rfc3339(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
