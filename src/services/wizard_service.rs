use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::models::booking::{BookingDraft, BookingSubmission, DraftUpdate};
use crate::models::catalog;
use crate::services::pricing_service::{PriceQuote, PricingPolicy, PricingService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Category,
    Space,
    AddOns,
    Frequency,
    Schedule,
    Location,
    Review,
}

impl StepKind {
    pub fn title(&self) -> &'static str {
        match self {
            StepKind::Category => "What type of cleaning do you need?",
            StepKind::Space => "Tell us about your space",
            StepKind::AddOns => "Add-on Services",
            StepKind::Frequency => "How often do you need cleaning?",
            StepKind::Schedule => "When should we come?",
            StepKind::Location => "Where should we clean?",
            StepKind::Review => "Review & Confirm",
        }
    }
}

/// Which feature set the booking flow runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPreset {
    /// space, frequency, schedule, location, review
    Basic,
    /// adds the add-ons step
    Standard,
    /// adds the category step, square footage and time slots
    #[default]
    Full,
}

impl WizardPreset {
    pub fn from_name(name: &str) -> Option<WizardPreset> {
        match name {
            "basic" => Some(WizardPreset::Basic),
            "standard" => Some(WizardPreset::Standard),
            "full" => Some(WizardPreset::Full),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StepDescriptor {
    pub kind: StepKind,
    is_complete: fn(&BookingDraft) -> bool,
}

impl StepDescriptor {
    pub fn new(kind: StepKind, is_complete: fn(&BookingDraft) -> bool) -> Self {
        StepDescriptor { kind, is_complete }
    }

    pub fn ungated(kind: StepKind) -> Self {
        StepDescriptor::new(kind, |_| true)
    }

    pub fn is_complete(&self, draft: &BookingDraft) -> bool {
        (self.is_complete)(draft)
    }
}

fn category_selected(draft: &BookingDraft) -> bool {
    draft.service_category.is_some()
}

fn date_and_time_selected(draft: &BookingDraft) -> bool {
    draft.date.is_some() && draft.time.is_some()
}

#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub steps: Vec<StepDescriptor>,
    pub square_footage: bool,
    pub time_slots: bool,
    pub pricing: PricingPolicy,
}

impl WizardConfig {
    pub fn preset(preset: WizardPreset, pricing: PricingPolicy) -> Self {
        let mut steps = Vec::with_capacity(7);
        let full = preset == WizardPreset::Full;

        if full {
            steps.push(StepDescriptor::new(StepKind::Category, category_selected));
        }
        steps.push(StepDescriptor::ungated(StepKind::Space));
        if preset != WizardPreset::Basic {
            steps.push(StepDescriptor::ungated(StepKind::AddOns));
        }
        steps.push(StepDescriptor::ungated(StepKind::Frequency));
        if full {
            steps.push(StepDescriptor::new(StepKind::Schedule, date_and_time_selected));
        } else {
            steps.push(StepDescriptor::ungated(StepKind::Schedule));
        }
        steps.push(StepDescriptor::ungated(StepKind::Location));
        steps.push(StepDescriptor::ungated(StepKind::Review));

        WizardConfig {
            steps,
            square_footage: full,
            time_slots: full,
            pricing,
        }
    }
}

/// Reported after every navigation attempt so the view knows whether to
/// scroll back to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepChange {
    Moved { from: usize, to: usize },
    Unchanged,
}

impl StepChange {
    pub fn changed(&self) -> bool {
        matches!(self, StepChange::Moved { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepProgress {
    pub number: usize,
    pub kind: StepKind,
    pub state: ProgressState,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedAddOn {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
}

/// Sidebar and review-step summary of the draft.
#[derive(Debug, Clone, Serialize)]
pub struct BookingSummary {
    pub space: String,
    pub compact_space: String,
    pub service: Option<&'static str>,
    pub frequency: String,
    pub add_on_count: usize,
    pub selected_add_ons: Vec<SelectedAddOn>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WizardFeatures {
    pub square_footage: bool,
    pub time_slots: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: usize,
    pub total_steps: usize,
    pub kind: StepKind,
    pub title: &'static str,
    pub progress: Vec<StepProgress>,
    pub can_go_back: bool,
    pub can_go_next: bool,
    pub show_discount_teaser: bool,
    pub submitting: bool,
    pub features: WizardFeatures,
    pub draft: BookingDraft,
    pub summary: BookingSummary,
    pub quote: PriceQuote,
}

/// The booking wizard: a step index over a configured step list plus the
/// draft being collected.
#[derive(Debug, Clone)]
pub struct Wizard {
    config: WizardConfig,
    step: usize,
    draft: BookingDraft,
    submitting: bool,
}

impl Wizard {
    pub fn new(config: WizardConfig) -> Self {
        Wizard {
            config,
            step: 1,
            draft: BookingDraft::default(),
            submitting: false,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.config.steps.len()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn current_step(&self) -> &StepDescriptor {
        &self.config.steps[self.step - 1]
    }

    pub fn is_at_review(&self) -> bool {
        self.step == self.total_steps()
    }

    /// True between `begin_submission` and `finish_submission`. The draft
    /// and step are frozen meanwhile.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn update(&mut self, update: DraftUpdate) {
        if self.submitting {
            return;
        }
        // Fields hidden by the configuration stay empty.
        let hidden = match &update {
            DraftUpdate::SquareFootage(Some(_)) => !self.config.square_footage,
            DraftUpdate::Time(Some(_)) => !self.config.time_slots,
            _ => false,
        };
        if hidden {
            return;
        }
        self.draft = std::mem::take(&mut self.draft).apply(update);
    }

    pub fn toggle_add_on(&mut self, id: &str) {
        if self.submitting {
            return;
        }
        self.draft = std::mem::take(&mut self.draft).toggle_add_on(id);
    }

    pub fn can_go_next(&self) -> bool {
        !self.submitting
            && self.step < self.total_steps()
            && self.current_step().is_complete(&self.draft)
    }

    pub fn can_go_back(&self) -> bool {
        !self.submitting && self.step > 1
    }

    pub fn next(&mut self) -> StepChange {
        if !self.can_go_next() {
            return StepChange::Unchanged;
        }
        let from = self.step;
        self.step += 1;
        StepChange::Moved { from, to: self.step }
    }

    pub fn back(&mut self) -> StepChange {
        if !self.can_go_back() {
            return StepChange::Unchanged;
        }
        let from = self.step;
        self.step -= 1;
        StepChange::Moved { from, to: self.step }
    }

    pub fn total_price(&self) -> u32 {
        PricingService::charged_total(&self.draft, self.config.pricing)
    }

    pub fn summary(&self) -> BookingSummary {
        let selected_add_ons: Vec<SelectedAddOn> = self
            .draft
            .add_ons
            .iter()
            .filter_map(|id| catalog::find_add_on(id))
            .map(|add_on| SelectedAddOn {
                id: add_on.id,
                name: add_on.name,
                price: add_on.price,
            })
            .collect();

        BookingSummary {
            space: self.draft.space_label(),
            compact_space: self.draft.compact_space_label(),
            service: catalog::find_service_tier(&self.draft.service_tier).map(|tier| tier.name),
            frequency: self.draft.frequency.label(),
            add_on_count: selected_add_ons.len(),
            selected_add_ons,
        }
    }

    pub fn view(&self) -> StepView {
        let current = self.current_step();
        let progress = self
            .config
            .steps
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                let number = index + 1;
                let state = if number < self.step {
                    ProgressState::Done
                } else if number == self.step {
                    ProgressState::Current
                } else {
                    ProgressState::Upcoming
                };
                StepProgress {
                    number,
                    kind: descriptor.kind,
                    state,
                }
            })
            .collect();

        StepView {
            step: self.step,
            total_steps: self.total_steps(),
            kind: current.kind,
            title: current.kind.title(),
            progress,
            can_go_back: self.can_go_back(),
            can_go_next: self.can_go_next(),
            show_discount_teaser: !self.is_at_review(),
            submitting: self.submitting,
            features: WizardFeatures {
                square_footage: self.config.square_footage,
                time_slots: self.config.time_slots,
            },
            draft: self.draft.clone(),
            summary: self.summary(),
            quote: PricingService::quote(&self.draft, self.config.pricing),
        }
    }

    /// Packages the draft and its charged price for the booking store.
    /// Only allowed from the review step.
    pub fn prepare_submission(&self, user_id: &str) -> Result<BookingSubmission, BookingError> {
        if !self.is_at_review() {
            return Err(BookingError::NotAtReview);
        }

        Ok(BookingSubmission {
            user_id: user_id.to_string(),
            details: self.draft.clone(),
            total_price: self.total_price(),
        })
    }

    /// Packages the draft for the store and freezes the wizard until
    /// [`Wizard::finish_submission`] is called. Only one submission can be
    /// in flight per wizard.
    pub fn begin_submission(&mut self, user_id: &str) -> Result<BookingSubmission, BookingError> {
        if self.submitting {
            return Err(BookingError::SubmissionInProgress);
        }
        let submission = self.prepare_submission(user_id)?;
        self.submitting = true;
        Ok(submission)
    }

    /// A saved booking starts the wizard over with a fresh draft. A failed
    /// one leaves the draft and step as they were so the customer can retry.
    pub fn finish_submission(&mut self, saved: bool) {
        self.submitting = false;
        if saved {
            self.step = 1;
            self.draft = BookingDraft::default();
        }
    }
}
