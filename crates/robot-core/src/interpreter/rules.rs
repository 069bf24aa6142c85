//! Ordered phrase rules for free-form (recognized speech) commands.
//!
//! Rules are checked top to bottom and the first match wins. The order is
//! load-bearing: "apagar todo rojo" switches the red LED, it does not turn
//! everything off.
//!
//! Spanish phrases match by plain substring containment. English phrases
//! match whole words only, so "stored" never mentions red and "deactivate"
//! never activates.

use robot_types::{Command, Component, Language};

/// What a matching rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Switch a component; on when an activation word is present, else off.
    Switch(Component),
    AllOff,
    Status,
}

/// How a phrase is looked up in the recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matching {
    /// Anywhere in the text, including inside longer words.
    Substring,
    /// As a run of complete words.
    WholeWords,
}

#[derive(Debug)]
struct VoiceRule {
    triggers: &'static [&'static str],
    action: Action,
}

/// Rule table plus the words that mean "turn on" for one language.
#[derive(Debug)]
struct RuleSet {
    rules: &'static [VoiceRule],
    activation_words: &'static [&'static str],
    matching: Matching,
}

/// Recognized text, split into words once for whole-word lookups.
struct Utterance<'a> {
    raw: &'a str,
    words: Vec<&'a str>,
}

impl<'a> Utterance<'a> {
    fn new(raw: &'a str) -> Self {
        let words = raw
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        Self { raw, words }
    }

    fn mentions(&self, phrase: &str, matching: Matching) -> bool {
        match matching {
            Matching::Substring => self.raw.contains(phrase),
            Matching::WholeWords => {
                let wanted: Vec<&str> = phrase.split_whitespace().collect();
                !wanted.is_empty()
                    && self
                        .words
                        .windows(wanted.len())
                        .any(|window| window == wanted.as_slice())
            }
        }
    }

    fn mentions_any(&self, phrases: &[&str], matching: Matching) -> bool {
        phrases.iter().any(|p| self.mentions(p, matching))
    }
}

static SPANISH: RuleSet = RuleSet {
    rules: &[
        VoiceRule {
            triggers: &["led rojo", "rojo"],
            action: Action::Switch(Component::LedRed),
        },
        VoiceRule {
            triggers: &["led verde", "verde"],
            action: Action::Switch(Component::LedGreen),
        },
        VoiceRule {
            triggers: &["led azul", "azul"],
            action: Action::Switch(Component::LedBlue),
        },
        VoiceRule {
            triggers: &["motor uno", "motor 1"],
            action: Action::Switch(Component::Motor1),
        },
        VoiceRule {
            triggers: &["motor dos", "motor 2"],
            action: Action::Switch(Component::Motor2),
        },
        VoiceRule {
            triggers: &["servo"],
            action: Action::Switch(Component::Servo),
        },
        VoiceRule {
            triggers: &["apagar todo", "todo apagado"],
            action: Action::AllOff,
        },
        VoiceRule {
            triggers: &["estado", "status"],
            action: Action::Status,
        },
    ],
    activation_words: &["encender", "activar"],
    matching: Matching::Substring,
};

static ENGLISH: RuleSet = RuleSet {
    rules: &[
        VoiceRule {
            triggers: &["led red", "red"],
            action: Action::Switch(Component::LedRed),
        },
        VoiceRule {
            triggers: &["led green", "green"],
            action: Action::Switch(Component::LedGreen),
        },
        VoiceRule {
            triggers: &["led blue", "blue"],
            action: Action::Switch(Component::LedBlue),
        },
        VoiceRule {
            triggers: &["motor one", "motor 1"],
            action: Action::Switch(Component::Motor1),
        },
        VoiceRule {
            triggers: &["motor two", "motor 2"],
            action: Action::Switch(Component::Motor2),
        },
        VoiceRule {
            triggers: &["servo"],
            action: Action::Switch(Component::Servo),
        },
        VoiceRule {
            triggers: &["all off", "turn off everything", "everything off"],
            action: Action::AllOff,
        },
        VoiceRule {
            triggers: &["status"],
            action: Action::Status,
        },
    ],
    activation_words: &["turn on", "activate", "switch on"],
    matching: Matching::WholeWords,
};

fn rule_set(language: Language) -> &'static RuleSet {
    match language {
        Language::English => &ENGLISH,
        Language::Spanish => &SPANISH,
    }
}

/// Maps recognized speech to a command. `text` must already be lower-cased.
pub fn decode_voice(text: &str, language: Language) -> Command {
    let set = rule_set(language);
    let utterance = Utterance::new(text);
    let Some(rule) = set
        .rules
        .iter()
        .find(|rule| utterance.mentions_any(rule.triggers, set.matching))
    else {
        return Command::Unrecognized(text.to_string());
    };

    match rule.action {
        Action::Switch(component) => Command::SetComponent {
            component: component.as_str().to_string(),
            on: utterance.mentions_any(set.activation_words, set.matching),
        },
        Action::AllOff => Command::AllOff,
        Action::Status => Command::Status,
    }
}
