//! The 3 declared capability tools: lookup_user, lookup_plant,
//! fetch_forecast.

pub mod fetch_forecast;
pub mod lookup_plant;
pub mod lookup_user;

pub use fetch_forecast::FetchForecast;
pub use lookup_plant::LookupPlant;
pub use lookup_user::LookupUser;

use crate::types::AdvisorTool;

/// Registry of capability tools, keyed by declared name.
pub struct ToolRegistry {
    tools: Vec<Box<dyn AdvisorTool>>,
}

impl ToolRegistry {
    /// Registry with the 3 default capabilities.
    pub fn with_defaults() -> Self {
        Self {
            tools: vec![
                Box::new(LookupUser),
                Box::new(LookupPlant),
                Box::new(FetchForecast),
            ],
        }
    }

    /// Look up a tool by its declared name.
    pub fn get(&self, name: &str) -> Option<&dyn AdvisorTool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Iterate over all registered tools (declaration order).
    pub fn iter(&self) -> impl Iterator<Item = &dyn AdvisorTool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    /// Declared tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}
