//! What the page should show for a given wizard state.

use std::collections::BTreeSet;

use super::form::Party;
use super::validation::WizardField;
use super::{Phase, TOTAL_STEPS, Wizard};

pub const DEFAULT_PLUS_ONE_TITLE: &str = "Your +1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: u8,
    pub active: bool,
    pub completed: bool,
}

/// Visible navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buttons {
    pub prev: bool,
    pub next: bool,
    pub submit: bool,
}

/// Which dietary inputs are visible for one party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealPanels {
    pub lunch: bool,
    pub dinner: bool,
}

/// Companion section: the name input on step 1 and the event card on step 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlusOneCard {
    pub visible: bool,
    pub title: String,
    pub meals: MealPanels,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub step: u8,
    pub indicators: Vec<StepIndicator>,
    pub buttons: Buttons,
    /// Submit is locked and shows a loading state while in flight.
    pub submitting: bool,
    pub your_meals: MealPanels,
    pub plus_one: PlusOneCard,
    pub field_errors: BTreeSet<WizardField>,
    pub success_modal: bool,
}

/// ## Summary
/// Projects the wizard state onto the page.
#[must_use]
pub fn project(wizard: &Wizard) -> View {
    let step = wizard.step();
    let form = wizard.form();
    let brings = form.brings_plus_one();
    let name = form.plus_one_name.trim();

    View {
        step,
        indicators: (1..=TOTAL_STEPS)
            .map(|i| StepIndicator {
                step: i,
                active: i == step,
                completed: i < step,
            })
            .collect(),
        buttons: Buttons {
            prev: step > 1,
            next: step < TOTAL_STEPS,
            submit: step == TOTAL_STEPS,
        },
        submitting: wizard.phase() == Phase::Submitting,
        your_meals: MealPanels {
            lunch: form.you.church,
            dinner: form.you.reception,
        },
        plus_one: PlusOneCard {
            visible: brings,
            title: if name.is_empty() {
                DEFAULT_PLUS_ONE_TITLE.to_string()
            } else {
                name.to_string()
            },
            meals: MealPanels {
                lunch: brings && form.party(Party::PlusOne).church,
                dinner: brings && form.party(Party::PlusOne).reception,
            },
        },
        field_errors: wizard.errors().clone(),
        success_modal: wizard.phase() == Phase::Submitted,
    }
}
