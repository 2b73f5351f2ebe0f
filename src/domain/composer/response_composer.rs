//! Response composer.
//!
//! Renders a strategy directive into the reply text shown to the user.
//! Crisis replies always carry the library's crisis block verbatim, or a
//! built-in block when the library cannot supply one.

use std::sync::Arc;

use crate::domain::dialogue::{ListeningFocus, Strategy, StrategyDirective};
use crate::domain::resources::ResourceCategory;
use crate::domain::session::SessionContext;
use crate::ports::{ResourceError, ResourceLibrary};

use super::phrases;

/// A rendered reply plus what went wrong while rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedReply {
    pub text: String,
    /// Set when a library lookup failed and fallback text was used.
    pub unavailable_resource: Option<(ResourceCategory, ResourceError)>,
}

impl ComposedReply {
    /// True when the crisis entry was missing and the built-in block was used.
    pub fn used_crisis_fallback(&self) -> bool {
        matches!(
            self.unavailable_resource,
            Some((ResourceCategory::Crisis, _))
        )
    }
}

/// Turns directives into reply text.
#[derive(Clone)]
pub struct ResponseComposer {
    library: Arc<dyn ResourceLibrary>,
}

impl ResponseComposer {
    pub fn new(library: Arc<dyn ResourceLibrary>) -> Self {
        Self { library }
    }

    /// Message shown when a session starts.
    pub fn welcome(&self) -> String {
        phrases::WELCOME.to_string()
    }

    /// Renders one directive against the session it was decided for.
    pub fn compose(&self, directive: &StrategyDirective, context: &SessionContext) -> ComposedReply {
        let seed = context.turns_processed();
        let mut unavailable = None;
        let mut parts: Vec<String> = Vec::new();

        match directive.strategy {
            Strategy::Greeting => parts.push(phrases::pick(phrases::GREETINGS, seed).to_string()),

            Strategy::ReflectiveListening { focus, offer } => {
                push_opener(&mut parts, directive);
                let body = match focus {
                    ListeningFocus::Venting => phrases::pick(phrases::VENTING, seed),
                    ListeningFocus::Anxiety => phrases::pick(phrases::ANXIETY, seed),
                };
                parts.push(body.to_string());
                if let Some(technique) = offer {
                    parts.push(format!(
                        "Would you like to try {} together? Reply yes to start or no to skip.",
                        technique.name()
                    ));
                }
            }

            Strategy::SleepHygiene => {
                push_opener(&mut parts, directive);
                match self.library.lookup(ResourceCategory::SleepHygiene) {
                    Ok(entry) => {
                        parts.push(phrases::pick(phrases::SLEEP_INTRO, seed).to_string());
                        parts.push(entry.render_block());
                    }
                    Err(err) => {
                        unavailable = Some(self.lookup_failed(ResourceCategory::SleepHygiene, err));
                        parts.push(phrases::SUPPORTIVE_FALLBACK.to_string());
                    }
                }
            }

            Strategy::ExerciseStep { technique, step } => {
                let steps = technique.steps();
                let index = step.min(steps.len().saturating_sub(1));
                if step == 0 {
                    parts.push(format!("Let's try {} together.", technique.name()));
                    let category = technique.resource_category();
                    match self.library.lookup(category) {
                        Ok(entry) => parts.push(entry.render_block()),
                        Err(err) => unavailable = Some(self.lookup_failed(category, err)),
                    }
                }
                parts.push(format!(
                    "Step {} of {}: {}",
                    index + 1,
                    steps.len(),
                    steps.get(index).copied().unwrap_or_default()
                ));
                parts.push("Reply next when you're ready, or stop at any time.".to_string());
            }

            Strategy::ExerciseComplete { technique } => {
                parts.push(format!(
                    "Nice work finishing {}. How do you feel now? You can log your mood any time with a number from 1 to 5.",
                    technique.name()
                ));
            }

            Strategy::ExerciseDeclined => parts.push(phrases::EXERCISE_DECLINED.to_string()),

            Strategy::MoodPrompt => {
                push_opener(&mut parts, directive);
                parts.push(phrases::MOOD_PROMPT.to_string());
            }

            Strategy::MoodLogged { label } => {
                parts.push(format!(
                    "Thanks, I've logged your mood as {} ({}/5).",
                    label,
                    label.score()
                ));
                let summary = context.mood_summary();
                if summary.total_entries > 1 {
                    parts.push(format!(
                        "Across {} check-ins your average is {:.1} and the trend looks {}.",
                        summary.total_entries,
                        summary.average_score,
                        summary.trend.to_string().replace('_', " ")
                    ));
                }
            }

            Strategy::ResourceLookup { category } => match self.library.lookup(category) {
                Ok(entry) => {
                    parts.push(phrases::RESOURCE_INTRO.to_string());
                    parts.push(entry.render_block());
                }
                Err(err) => {
                    unavailable = Some(self.lookup_failed(category, err));
                    if category == ResourceCategory::Crisis {
                        parts.push(phrases::CRISIS_FALLBACK_BLOCK.to_string());
                    } else {
                        parts.push(phrases::SUPPORTIVE_FALLBACK.to_string());
                    }
                }
            },

            Strategy::ClarifyingQuestion => {
                push_opener(&mut parts, directive);
                parts.push(phrases::pick(phrases::CLARIFYING, seed).to_string());
            }

            Strategy::CrisisResponse { reoffer } => {
                parts.push(
                    if reoffer {
                        phrases::CRISIS_REOFFER
                    } else {
                        phrases::CRISIS_OPENING
                    }
                    .to_string(),
                );
                match self.library.lookup(ResourceCategory::Crisis) {
                    Ok(entry) => parts.push(entry.render_block()),
                    Err(err) => {
                        unavailable = Some(self.lookup_failed(ResourceCategory::Crisis, err));
                        parts.push(phrases::CRISIS_FALLBACK_BLOCK.to_string());
                    }
                }
                parts.push(phrases::CRISIS_CLOSING.to_string());
            }

            Strategy::CrisisDeEscalation => parts.push(phrases::CRISIS_DE_ESCALATION.to_string()),

            Strategy::SupportiveFallback => {
                parts.push(phrases::SUPPORTIVE_FALLBACK.to_string());
                parts.push(phrases::ELEVATED_RISK_POINTER.to_string());
            }
        }

        if directive.risk_level.warrants_resources() && !carries_crisis_contacts(&directive.strategy)
        {
            parts.push(phrases::ELEVATED_RISK_POINTER.to_string());
        }

        if directive.input_truncated {
            parts.push(phrases::TRUNCATION_NOTE.to_string());
        }

        ComposedReply {
            text: parts.join("\n\n"),
            unavailable_resource: unavailable,
        }
    }

    fn lookup_failed(
        &self,
        category: ResourceCategory,
        err: ResourceError,
    ) -> (ResourceCategory, ResourceError) {
        tracing::warn!(category = %category, error = %err, "resource lookup failed; using fallback text");
        (category, err)
    }
}

fn push_opener(parts: &mut Vec<String>, directive: &StrategyDirective) {
    if let Some(opener) = phrases::tone_opener(directive.tone) {
        parts.push(opener.to_string());
    }
}

/// Strategies whose text already points at crisis support.
fn carries_crisis_contacts(strategy: &Strategy) -> bool {
    matches!(
        strategy,
        Strategy::CrisisResponse { .. }
            | Strategy::SupportiveFallback
            | Strategy::ResourceLookup {
                category: ResourceCategory::Crisis
            }
    )
}
