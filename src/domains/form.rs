use crate::domains::preferences::{RoutinePreferences, SavedPreferences};

pub const DEFAULT_ACTIVITIES: [&str; 6] = [
    "stretching",
    "cardio",
    "meditation",
    "journaling",
    "reading",
    "planning",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOption {
    pub value: String,
    pub checked: bool,
}

/// Native stand-in for the routine form: four single-value fields and the
/// `activities` checkbox group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineForm {
    pub time_of_day: String,
    pub focus_area: String,
    pub time_available: String,
    pub energy_level: String,
    pub activities: Vec<ActivityOption>,
}

impl Default for RoutineForm {
    fn default() -> Self {
        Self::with_activity_options(DEFAULT_ACTIVITIES.iter().copied())
    }
}

impl RoutineForm {
    pub fn with_activity_options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            time_of_day: "Morning".to_string(),
            focus_area: "Productivity".to_string(),
            time_available: "30".to_string(),
            energy_level: "Medium".to_string(),
            activities: options
                .into_iter()
                .map(|value| ActivityOption {
                    value: value.into(),
                    checked: false,
                })
                .collect(),
        }
    }

    /// Restores saved values. Missing fields keep whatever the form already shows.
    pub fn populate(&mut self, saved: &SavedPreferences) {
        if let Some(value) = &saved.time_of_day {
            self.time_of_day = value.clone();
        }
        if let Some(value) = &saved.focus_area {
            self.focus_area = value.clone();
        }
        if let Some(value) = &saved.time_available {
            self.time_available = value.clone();
        }
        if let Some(value) = &saved.energy_level {
            self.energy_level = value.clone();
        }
        if let Some(values) = &saved.activities {
            self.set_activities(values);
        }
    }

    /// Checks exactly the options named in `values`; names with no matching checkbox are dropped.
    pub fn set_activities<S: AsRef<str>>(&mut self, values: &[S]) {
        for option in &mut self.activities {
            option.checked = values.iter().any(|v| v.as_ref() == option.value);
        }
    }

    pub fn checked_activities(&self) -> Vec<String> {
        self.activities
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.value.clone())
            .collect()
    }

    pub fn preferences(&self) -> RoutinePreferences {
        RoutinePreferences {
            time_of_day: self.time_of_day.clone(),
            focus_area: self.focus_area.clone(),
            time_available: self.time_available.clone(),
            energy_level: self.energy_level.clone(),
            activities: self.checked_activities(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populate_keeps_defaults_for_missing_fields() {
        let mut form = RoutineForm::default();
        form.populate(&SavedPreferences {
            focus_area: Some("Strength".to_string()),
            ..Default::default()
        });
        assert_eq!(form.focus_area, "Strength");
        assert_eq!(form.time_of_day, "Morning");
        assert!(form.checked_activities().is_empty());
    }

    #[test]
    fn activities_follow_option_order_and_ignore_unknown_values() {
        let mut form = RoutineForm::default();
        form.set_activities(&["reading", "juggling", "cardio"]);
        assert_eq!(form.checked_activities(), vec!["cardio", "reading"]);

        form.set_activities::<&str>(&[]);
        assert!(form.preferences().activities.is_empty());
    }

    #[test]
    fn populate_replaces_previous_checks() {
        let mut form = RoutineForm::default();
        form.set_activities(&["cardio"]);
        form.populate(&SavedPreferences {
            activities: Some(vec!["meditation".to_string()]),
            ..Default::default()
        });
        assert_eq!(form.checked_activities(), vec!["meditation"]);
    }
}
