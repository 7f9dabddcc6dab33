//! Mock plant store for testing — serves pre-loaded user and plant data.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::error::{ToolError, ToolResult};
use crate::store::PlantStore;
use crate::types::UserRecord;

/// A mock store that serves pre-loaded records by identifier.
pub struct MockStore {
    users: HashMap<String, UserRecord>,
    plants: HashMap<String, Value>,
    /// Error every call fails with, when set (for error-path tests).
    fail_with: Option<fn() -> ToolError>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            plants: HashMap::new(),
            fail_with: None,
        }
    }

    /// Register a user record.
    pub fn add_user(&mut self, user_id: impl Into<String>, record: UserRecord) {
        self.users.insert(user_id.into(), record);
    }

    /// Register a plant definition item.
    pub fn add_plant(&mut self, plant_id: impl Into<String>, item: Value) {
        self.plants.insert(plant_id.into(), item);
    }

    /// Create a mock with a small sample garden.
    ///
    /// Users: `testuser1` (two plants), `nolocation1` (missing
    /// coordinates), `noplants1` (empty plant list).
    pub fn with_sample_garden() -> Self {
        let mut m = Self::new();
        m.add_user(
            "testuser1",
            UserRecord {
                latitude: Some(51.5072),
                longitude: Some(-0.1276),
                plants: vec!["rose_1".into(), "fern_2".into()],
            },
        );
        m.add_user(
            "nolocation1",
            UserRecord {
                latitude: None,
                longitude: None,
                plants: vec!["rose_1".into()],
            },
        );
        m.add_user(
            "noplants1",
            UserRecord {
                latitude: Some(52.52),
                longitude: Some(13.405),
                plants: vec![],
            },
        );
        m.add_plant(
            "rose_1",
            json!({
                "plant_id": "rose_1",
                "common_name": "Rose",
                "min_temp_c": -5,
                "max_temp_c": 30,
                "ideal_humidity_pct": 65,
                "frost_tolerant": false,
                "common_weather_risks": ["frost", "strong wind"],
                "protection_methods": ["fleece cover", "staking"]
            }),
        );
        m.add_plant(
            "fern_2",
            json!({
                "plant_id": "fern_2",
                "common_name": "Boston Fern",
                "min_temp_c": 10,
                "max_temp_c": 26,
                "ideal_humidity_pct": 80,
                "frost_tolerant": false,
                "common_weather_risks": ["dry air"],
                "protection_methods": ["misting"]
            }),
        );
        m
    }

    /// Create a mock where every lookup fails with the given error.
    pub fn failing(fail_with: fn() -> ToolError) -> Self {
        Self {
            users: HashMap::new(),
            plants: HashMap::new(),
            fail_with: Some(fail_with),
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlantStore for MockStore {
    async fn get_user(&self, user_id: &str) -> ToolResult<Option<UserRecord>> {
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        Ok(self.users.get(user_id).cloned())
    }

    async fn get_plant(&self, plant_id: &str) -> ToolResult<Option<Value>> {
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        Ok(self.plants.get(plant_id).cloned())
    }
}
