// src/models/response.rs
//
// The body of a /get_trajectories reply.
//
// Three shapes are accepted:
//   {"error": "..."}                                  -> TrajectoryError::Backend
//   {"original": {..}, "reconstructed": {..}}         -> two labelled sets
//   {"<char>": [segments], ...}                       -> one set

use serde_json::Value;

use super::{TagPolicy, TrajectoryError, TrajectoryMap};

pub const PLAIN_SET_LABEL: &str = "trajectories";
const PAIRED_KEYS: [&str; 2] = ["original", "reconstructed"];

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySet {
    pub label: String,
    pub map: TrajectoryMap,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryResponse {
    sets: Vec<TrajectorySet>,
}

impl TrajectoryResponse {
    pub fn single(map: TrajectoryMap) -> Self {
        Self {
            sets: vec![TrajectorySet {
                label: PLAIN_SET_LABEL.to_string(),
                map,
            }],
        }
    }

    pub fn parse(body: &str, policy: TagPolicy) -> Result<Self, TrajectoryError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value, policy)
    }

    pub fn from_value(value: &Value, policy: TagPolicy) -> Result<Self, TrajectoryError> {
        let object = value.as_object().ok_or_else(|| {
            TrajectoryError::MalformedResponse("expected a JSON object".to_string())
        })?;

        if let Some(error) = object.get("error") {
            let message = match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            };
            return Err(TrajectoryError::Backend(message));
        }

        let is_paired = object.len() == PAIRED_KEYS.len()
            && PAIRED_KEYS
                .iter()
                .all(|key| object.get(*key).is_some_and(Value::is_object));

        if !is_paired {
            return Ok(Self::single(TrajectoryMap::decode(object, policy)?));
        }

        let sets = PAIRED_KEYS
            .iter()
            .filter_map(|key| object.get(*key).and_then(Value::as_object).map(|m| (*key, m)))
            .map(|(label, map)| {
                TrajectoryMap::decode(map, policy).map(|map| TrajectorySet {
                    label: label.to_string(),
                    map,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[TrajectorySet] {
        &self.sets
    }

    /// Total number of character canvases across all sets.
    pub fn canvas_count(&self) -> usize {
        self.sets.iter().map(|set| set.map.len()).sum()
    }
}
