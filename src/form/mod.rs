//! Recipe creation form.
//!
//! [`RecipeForm`] owns one editing session: the draft, the reference data used
//! by its selectors, the error list, and the submission phase. State is
//! published through a [`tokio::sync::watch`] channel so any rendering layer
//! can follow it without the form knowing how it is drawn.

pub mod draft;
pub mod reference;
pub mod row;

pub use draft::{DraftField, LineField, LineItem, RecipeDraft};
pub use reference::ReferenceData;
pub use row::{IngredientRow, RowEvent, SelectOption};

use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

use crate::api::RecipeApi;
use crate::error::ApiError;
use crate::model::{Recipe, ValidationErrorEntry};

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything a renderer needs to draw the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: RecipeDraft,
    pub errors: Vec<ValidationErrorEntry>,
    pub phase: Phase,
    pub reference: ReferenceData,
}

impl FormState {
    /// Error lines as displayed, e.g. `body.title → field required`.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|entry| entry.to_string()).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = IngredientRow<'_>> + '_ {
        row::rows(&self.draft, &self.reference.ingredients)
    }

    pub fn author_options(&self) -> Vec<SelectOption> {
        self.reference.author_options(self.draft.author_id())
    }
}

/// Result of one call to [`RecipeForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the recipe. Carries the stored recipe when the
    /// response body could be decoded.
    Created(Option<Recipe>),
    /// Rejected with per-field problems, either locally or by the backend.
    Invalid(Vec<ValidationErrorEntry>),
    /// Rejected for any other reason.
    Failed,
    /// Another submission was still in flight; nothing was sent.
    Busy,
}

type CreatedCallback = Box<dyn Fn() + Send + Sync>;

/// Controller for one recipe creation session
pub struct RecipeForm<A> {
    api: A,
    state: watch::Sender<FormState>,
    on_created: Option<CreatedCallback>,
    reference_requested: AtomicBool,
}

impl<A: RecipeApi> RecipeForm<A> {
    /// Create a form with an empty draft and no reference data yet.
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            api,
            state,
            on_created: None,
            reference_requested: AtomicBool::new(false),
        }
    }

    /// Create a form and load its reference data.
    pub async fn mount(api: A) -> Self {
        let form = Self::new(api);
        form.load_reference_data().await;
        form
    }

    /// Register the hook run once after every confirmed creation.
    pub fn on_created(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_created = Some(Box::new(callback));
        self
    }

    /// Fetch ingredients and authors. Only the first call does anything.
    pub async fn load_reference_data(&self) {
        if self.reference_requested.swap(true, Ordering::SeqCst) {
            debug!("Reference data already requested for this form");
            return;
        }
        let reference = ReferenceData::load(&self.api).await;
        self.state.send_modify(|state| state.reference = reference);
    }

    /// The backend this form submits to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Copy of the current draft.
    pub fn draft(&self) -> RecipeDraft {
        self.state.borrow().draft.clone()
    }

    /// Errors from the last submit attempt.
    pub fn errors(&self) -> Vec<ValidationErrorEntry> {
        self.state.borrow().errors.clone()
    }

    /// Current submission phase.
    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn set_field(&self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        self.state
            .send_modify(|state| state.draft.set_field(field, value));
    }

    pub fn update_ingredient(&self, index: usize, field: LineField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|state| {
            state.draft.update_ingredient(index, field, value)
        });
    }

    pub fn add_ingredient(&self) {
        self.state.send_modify(|state| state.draft.add_ingredient());
    }

    pub fn remove_ingredient(&self, index: usize) {
        self.state
            .send_if_modified(|state| state.draft.remove_ingredient(index));
    }

    pub fn reset(&self) {
        self.state.send_modify(|state| state.draft.reset());
    }

    /// Apply an event produced by an [`IngredientRow`].
    pub fn apply(&self, event: RowEvent) {
        match event {
            RowEvent::Changed {
                index,
                field,
                value,
            } => self.update_ingredient(index, field, value),
            RowEvent::Removed { index } => self.remove_ingredient(index),
        }
    }

    /// Validate the draft, send it, and record the result.
    ///
    /// Never fails: every error ends up in the form's error list and phase.
    pub async fn submit(&self) -> SubmitOutcome {
        let mut submitted = None;
        self.state.send_if_modified(|state| {
            if state.phase == Phase::Submitting {
                return false;
            }
            state.phase = Phase::Submitting;
            state.errors.clear();
            submitted = Some(state.draft.clone());
            true
        });
        let Some(draft) = submitted else {
            warn!("Submission already in progress, ignoring");
            return SubmitOutcome::Busy;
        };
        let in_flight = InFlight::new(&self.state);

        let missing = draft.missing_required();
        if !missing.is_empty() {
            warn!("Recipe draft has {} empty required fields", missing.len());
            in_flight.finish(Phase::Failed, missing.clone());
            return SubmitOutcome::Invalid(missing);
        }

        let request = draft.to_request();
        debug!("Submitting recipe: {:?}", request);

        match self.api.create_recipe(&request).await {
            Ok(created) => {
                info!("Recipe created successfully!");
                in_flight.succeed();
                if let Some(callback) = &self.on_created {
                    callback();
                }
                SubmitOutcome::Created(created)
            }
            Err(ApiError::Validation(entries)) => {
                let lines: Vec<String> = entries.iter().map(|entry| entry.to_string()).collect();
                warn!("Recipe rejected by backend: {}", lines.join("; "));
                in_flight.finish(Phase::Failed, entries.clone());
                SubmitOutcome::Invalid(entries)
            }
            Err(e) => {
                error!("Error creating recipe: {}", e);
                in_flight.finish(Phase::Failed, vec![ValidationErrorEntry::generic()]);
                SubmitOutcome::Failed
            }
        }
    }
}

/// Holds the submission lock. Dropping it without finishing returns the form to idle.
struct InFlight<'a> {
    state: &'a watch::Sender<FormState>,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<FormState>) -> Self {
        Self { state, done: false }
    }

    fn finish(mut self, phase: Phase, errors: Vec<ValidationErrorEntry>) {
        self.state.send_modify(|state| {
            state.phase = phase;
            state.errors = errors;
        });
        self.done = true;
    }

    fn succeed(mut self) {
        self.state.send_modify(|state| {
            state.draft.reset();
            state.errors.clear();
            state.phase = Phase::Succeeded;
        });
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            debug!("Submission abandoned before completion");
            self.state.send_modify(|state| {
                if state.phase == Phase::Submitting {
                    state.phase = Phase::Idle;
                }
            });
        }
    }
}
