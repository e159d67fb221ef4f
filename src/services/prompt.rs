use crate::domains::preferences::RoutinePreferences;

/// Builds the instruction sent to the completion model.
///
/// Field values are interpolated as given. An empty activity list leaves the
/// "Preferred activities:" line with nothing after it.
pub fn build_prompt(preferences: &RoutinePreferences) -> String {
    let time_of_day = preferences.time_of_day.to_lowercase();
    let focus_area = &preferences.focus_area;
    let time_available = &preferences.time_available;
    let energy_level = &preferences.energy_level;
    let activities = preferences.activities.join(", ");

    format!(
        "Please create a personalized {time_of_day} routine for me with the following parameters:
- Focus area: {focus_area}
- Time available: {time_available} minutes
- Energy level: {energy_level}
- Preferred activities: {activities}

Please provide a structured, step-by-step routine that:
1. Fits within the {time_available} minute timeframe
2. Matches my current {energy} energy level
3. Incorporates my preferred activities where appropriate
4. Focuses on {focus} outcomes
5. Is suitable for {time_of_day} implementation

Format the routine with time allocations for each step.",
        energy = energy_level.to_lowercase(),
        focus = focus_area.to_lowercase(),
    )
}
