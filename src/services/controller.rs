use std::sync::Arc;

use tracing::{info, warn};

use crate::domains::form::RoutineForm;
use crate::domains::preferences::RoutinePreferences;
use crate::error::RoutineError;
use crate::interfaces::providers::CompletionClient;
use crate::markdown;
use crate::services::preference_store::PreferenceStore;
use crate::services::prompt::build_prompt;

pub const GENERATE_LABEL: &str = "Generate My Routine";
pub const GENERATE_ICON: &str = "fas fa-wand-magic-sparkles";
pub const BUSY_LABEL: &str = "Generating...";
pub const ERROR_MESSAGE: &str =
    "Sorry, there was an error generating your routine. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton {
    Idle,
    Busy,
}

impl SubmitButton {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitButton::Idle => GENERATE_LABEL,
            SubmitButton::Busy => BUSY_LABEL,
        }
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            SubmitButton::Idle => Some(GENERATE_ICON),
            SubmitButton::Busy => None,
        }
    }

    pub fn disabled(&self) -> bool {
        matches!(self, SubmitButton::Busy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Hidden,
    Routine { html: String },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SavePreferences(RoutinePreferences),
    SetButton(SubmitButton),
    RequestCompletion { prompt: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FormPopulated,
    PreferencesSaved,
    SaveFailed,
    Button(SubmitButton),
    Result(ResultView),
}

/// The pure half of a submit: what has to happen, in order, for these preferences.
pub fn plan_submit(preferences: &RoutinePreferences) -> Vec<Effect> {
    vec![
        Effect::SavePreferences(preferences.clone()),
        Effect::SetButton(SubmitButton::Busy),
        Effect::RequestCompletion {
            prompt: build_prompt(preferences),
        },
    ]
}

pub struct FormController {
    store: PreferenceStore,
    client: Arc<dyn CompletionClient>,
    form: RoutineForm,
    button: SubmitButton,
    result: ResultView,
    events: Vec<ViewEvent>,
}

impl FormController {
    pub fn new(store: PreferenceStore, client: Arc<dyn CompletionClient>) -> Self {
        Self::with_form(store, client, RoutineForm::default())
    }

    pub fn with_form(
        store: PreferenceStore,
        client: Arc<dyn CompletionClient>,
        form: RoutineForm,
    ) -> Self {
        Self {
            store,
            client,
            form,
            button: SubmitButton::Idle,
            result: ResultView::Hidden,
            events: Vec::new(),
        }
    }

    pub fn form(&self) -> &RoutineForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RoutineForm {
        &mut self.form
    }

    pub fn button(&self) -> SubmitButton {
        self.button
    }

    pub fn result(&self) -> &ResultView {
        &self.result
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Rehydrates the form from storage. Unreadable or corrupt records leave the defaults in place.
    pub fn load(&mut self) {
        match self.store.load() {
            Ok(Some(saved)) => {
                self.form.populate(&saved);
                self.events.push(ViewEvent::FormPopulated);
            }
            Ok(None) => {}
            Err(err @ RoutineError::CorruptPreferences(_)) => {
                warn!(error = %err, "ignoring saved preferences, using defaults");
            }
            Err(err) => {
                warn!(error = %err, "could not read saved preferences, using defaults");
            }
        }
    }

    /// Runs one submit cycle. Failures end up in the result view; the button is always idle again.
    pub async fn submit(&mut self) -> ResultView {
        let preferences = self.form.preferences();
        let mut outcome = Err(RoutineError::Runtime("no completion requested".to_string()));

        for effect in plan_submit(&preferences) {
            match effect {
                Effect::SavePreferences(prefs) => match self.store.save(&prefs) {
                    Ok(()) => self.events.push(ViewEvent::PreferencesSaved),
                    Err(err) => {
                        warn!(error = %err, "could not save preferences");
                        self.events.push(ViewEvent::SaveFailed);
                    }
                },
                Effect::SetButton(state) => self.set_button(state),
                Effect::RequestCompletion { prompt } => {
                    outcome = self.client.complete(&prompt).await;
                }
            }
        }

        let view = match outcome {
            Ok(text) => {
                info!(chars = text.len(), "routine generated");
                ResultView::Routine {
                    html: markdown::render(&text),
                }
            }
            Err(err) => {
                warn!(error = %err, "routine generation failed");
                ResultView::Error {
                    message: ERROR_MESSAGE.to_string(),
                }
            }
        };
        self.result = view.clone();
        self.events.push(ViewEvent::Result(view.clone()));
        self.set_button(SubmitButton::Idle);
        view
    }

    fn set_button(&mut self, state: SubmitButton) {
        self.button = state;
        self.events.push(ViewEvent::Button(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_saves_then_marks_busy_then_requests() {
        let prefs = RoutinePreferences {
            time_of_day: "Morning".to_string(),
            focus_area: "Strength".to_string(),
            time_available: "30".to_string(),
            energy_level: "High".to_string(),
            activities: vec!["cardio".to_string()],
        };
        let plan = plan_submit(&prefs);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0], Effect::SavePreferences(prefs.clone()));
        assert_eq!(plan[1], Effect::SetButton(SubmitButton::Busy));
        match &plan[2] {
            Effect::RequestCompletion { prompt } => {
                assert_eq!(prompt, &build_prompt(&prefs));
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn button_states_carry_label_and_icon() {
        assert_eq!(SubmitButton::Idle.label(), "Generate My Routine");
        assert_eq!(SubmitButton::Idle.icon(), Some(GENERATE_ICON));
        assert!(!SubmitButton::Idle.disabled());
        assert_eq!(SubmitButton::Busy.label(), "Generating...");
        assert!(SubmitButton::Busy.disabled());
    }
}
