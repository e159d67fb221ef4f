use serde::{Deserialize, Serialize};

/// The preference record the form collects on every submit.
///
/// Values are stored verbatim; the form's fixed controls are what keep them in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutinePreferences {
    pub time_of_day: String,
    pub focus_area: String,
    pub time_available: String,
    pub energy_level: String,
    pub activities: Vec<String>,
}

/// A persisted record as read back from storage.
///
/// Records written by an older form may lack fields, so every field is optional here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPreferences {
    pub time_of_day: Option<String>,
    pub focus_area: Option<String>,
    pub time_available: Option<String>,
    pub energy_level: Option<String>,
    pub activities: Option<Vec<String>>,
}

impl SavedPreferences {
    /// Returns the full record when no field is missing.
    pub fn into_complete(self) -> Option<RoutinePreferences> {
        Some(RoutinePreferences {
            time_of_day: self.time_of_day?,
            focus_area: self.focus_area?,
            time_available: self.time_available?,
            energy_level: self.energy_level?,
            activities: self.activities?,
        })
    }
}

impl From<RoutinePreferences> for SavedPreferences {
    fn from(value: RoutinePreferences) -> Self {
        Self {
            time_of_day: Some(value.time_of_day),
            focus_area: Some(value.focus_area),
            time_available: Some(value.time_available),
            energy_level: Some(value.energy_level),
            activities: Some(value.activities),
        }
    }
}
