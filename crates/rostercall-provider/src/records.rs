//! JSON:API record normalization — raw provider rows into typed records.
//!
//! List endpoints return rows whose person/team/position live in a separate
//! `included` array, referenced by `(type, id)`. Missing references fall
//! back to `Unknown ...` labels rather than dropping the row.

use std::collections::HashMap;

use serde_json::Value;

use rostercall_core::types::{AssignmentStatus, RawAssignment, RawNeededSlot};

/// Index `included` resources by `Type:id` (type capitalized).
pub fn build_included_index(included: &[Value]) -> HashMap<String, &Value> {
    let mut index = HashMap::new();
    for inc in included {
        if let (Some(t), Some(id)) = (inc["type"].as_str(), inc["id"].as_str()) {
            index.insert(format!("{}:{}", capitalize(t), id), inc);
        }
    }
    index
}

/// Normalize one team-member row into a `RawAssignment`.
pub fn normalize_assignment(row: &Value, index: &HashMap<String, &Value>) -> RawAssignment {
    let attrs = &row["attributes"];

    let person = lookup(row, index, "person");
    let team = lookup(row, index, "team");
    let position = lookup(row, index, "position");

    let person_name = person
        .and_then(person_display_name)
        .unwrap_or_else(|| "Unknown Person".into());
    let team_name = resource_attr(team, "name").unwrap_or_else(|| "Unknown Team".into());
    let role = resource_attr(position, "name")
        .or_else(|| attrs["title"].as_str().map(String::from))
        .unwrap_or_else(|| "Unknown Position".into());

    RawAssignment {
        person: person_name,
        team: team_name,
        role,
        status: AssignmentStatus::parse(attrs["status"].as_str().unwrap_or("")),
        raw_time: raw_time(attrs),
    }
}

/// Normalize one needed-position row into a `RawNeededSlot`.
pub fn normalize_needed_slot(row: &Value, index: &HashMap<String, &Value>) -> RawNeededSlot {
    let attrs = &row["attributes"];

    let team_name = lookup(row, index, "team")
        .and_then(|t| resource_attr(Some(t), "name"))
        .unwrap_or_else(|| "Unknown Team".into());
    let role = attrs["team_position_name"]
        .as_str()
        .or_else(|| attrs["position_name"].as_str())
        .map(String::from)
        .unwrap_or_else(|| "Unknown Position".into());

    RawNeededSlot {
        team: team_name,
        role,
        // The provider reports how many are still needed; guard the >= 1
        // invariant against malformed rows.
        quantity: attrs["quantity"].as_u64().unwrap_or(1).max(1) as u32,
        raw_time: raw_time(attrs),
    }
}

/// Resolve a relationship reference against the included index.
fn lookup<'a>(
    row: &Value,
    index: &HashMap<String, &'a Value>,
    relation: &str,
) -> Option<&'a Value> {
    let data = &row["relationships"][relation]["data"];
    let id = data["id"].as_str()?;
    let type_name = capitalize(data["type"].as_str().unwrap_or(relation));
    index.get(&format!("{type_name}:{id}")).copied()
}

fn person_display_name(person: &Value) -> Option<String> {
    let attrs = &person["attributes"];
    if let Some(name) = attrs["name"].as_str() {
        return Some(name.to_string());
    }
    match (attrs["first_name"].as_str(), attrs["last_name"].as_str()) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        _ => None,
    }
}

fn resource_attr(resource: Option<&Value>, attr: &str) -> Option<String> {
    resource
        .and_then(|r| r["attributes"][attr].as_str())
        .map(String::from)
}

/// Service time may come under either attribute name; absent is "TBD".
fn raw_time(attrs: &Value) -> Option<String> {
    attrs["starts_at"]
        .as_str()
        .or_else(|| attrs["start_time"].as_str())
        .map(String::from)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
