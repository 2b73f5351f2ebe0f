//! Reply phrase bank.
//!
//! Variants are picked deterministically from the session's turn count, so
//! the same conversation always reads the same way.

use crate::domain::signals::Tone;

pub(super) const WELCOME: &str = "Hi, I'm here to listen and support you. You can tell me how \
you're feeling, ask for a breathing exercise, log your mood, or ask for resources. \
I'm not a substitute for professional care, and if you're ever in danger I can share crisis contacts.";

pub(super) const GREETINGS: &[&str] = &[
    "Hi there, I'm glad you reached out. How are you feeling today?",
    "Hello! It's good to hear from you. What's on your mind?",
    "Hey, thanks for checking in. How has your day been?",
];

pub(super) const VENTING: &[&str] = &[
    "It sounds like a lot has been weighing on you. Do you want to tell me more about what happened?",
    "That sounds really hard, and it makes sense you'd feel this way. What has been the toughest part?",
    "Thank you for sharing that with me. I'm listening, so take your time.",
];

pub(super) const ANXIETY: &[&str] = &[
    "Anxiety can feel overwhelming, and what you're feeling is valid.",
    "It sounds like your mind has been racing. That can be exhausting.",
    "Feeling on edge like that is really uncomfortable. You're not alone in it.",
];

pub(super) const SLEEP_INTRO: &[&str] = &[
    "Sleep troubles can make everything feel heavier. Here are some things that often help:",
    "I'm sorry rest has been hard to come by. A few habits that many people find useful:",
];

pub(super) const CLARIFYING: &[&str] = &[
    "I want to make sure I understand. Could you tell me a little more about what's on your mind?",
    "I'm here with you. Can you say a bit more about how you're feeling?",
    "Thanks for telling me. What would be most helpful right now: talking it through, a breathing exercise, or some resources?",
];

pub(super) const EXERCISE_DECLINED: &str =
    "That's completely okay. We can try an exercise whenever you like. What would you like to talk about?";

pub(super) const MOOD_PROMPT: &str =
    "How would you rate your mood right now, from 1 (awful) to 5 (great)? You can also use a word like low or good.";

pub(super) const CRISIS_OPENING: &str = "I'm really sorry you're feeling this way. Your safety \
matters, and you don't have to go through this alone. Please reach out to one of these right now:";

pub(super) const CRISIS_REOFFER: &str =
    "I'm still here with you, and your safety matters most right now. These services can help immediately:";

pub(super) const CRISIS_CLOSING: &str = "If you are in immediate danger, please call your local \
emergency number. When you feel safe, let me know and we can keep talking.";

pub(super) const CRISIS_DE_ESCALATION: &str = "I'm really glad to hear that. The crisis contacts \
are always there if you need them again. What would you like to talk about now?";

pub(super) const RESOURCE_INTRO: &str = "Here's something that might help:";

pub(super) const SUPPORTIVE_FALLBACK: &str = "I'm here to listen. If things feel like too much, \
reaching out to someone you trust or a mental health professional can really help.";

pub(super) const ELEVATED_RISK_POINTER: &str = "If things are feeling heavy, support is available \
at any time. Just ask me for crisis resources and I'll share them.";

pub(super) const TRUNCATION_NOTE: &str =
    "(Your message was quite long, so I focused on the first part of it.)";

/// Built-in crisis block used when the library cannot supply one.
pub(super) const CRISIS_FALLBACK_BLOCK: &str = "Crisis support\n\
If you are thinking about harming yourself, please contact a crisis service now.\n\
- 988 Suicide & Crisis Lifeline: call or text 988 (US)\n\
- Crisis Text Line: text HOME to 741741\n\
- Emergency services: call your local emergency number";

/// Opening line matched to the user's tone, if any.
pub(super) fn tone_opener(tone: Tone) -> Option<&'static str> {
    match tone {
        Tone::StronglyNegative => Some("I can hear how painful this is."),
        Tone::Negative => Some("I'm sorry things are tough right now."),
        Tone::Neutral => None,
        Tone::Positive => Some("I'm glad there's some brightness in there."),
    }
}

/// Deterministic pick from a variant list.
pub(super) fn pick(variants: &'static [&'static str], seed: u64) -> &'static str {
    match variants.len() {
        0 => "",
        len => variants[(seed % len as u64) as usize],
    }
}
