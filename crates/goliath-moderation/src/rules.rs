// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern tables for the moderation screen.
//!
//! Patterns are compiled case-insensitively. A rule may capture a `target`
//! word; the hit is discarded when the target is one of the rule's excluded
//! words or its plural (`kill a process`, `poison a DNS cache`).

use crate::category::ModerationCategory;

pub(crate) struct RuleSpec {
    pub id: &'static str,
    pub pattern: &'static str,
    pub excluded_targets: &'static [&'static str],
    /// Whether the category's `input_allow` list can suppress this rule.
    /// Method requests never yield.
    pub yields_to_input_allow: bool,
}

pub(crate) struct CategorySpec {
    pub category: ModerationCategory,
    pub rules: &'static [RuleSpec],
    /// Suppresses a hit when one of these matches starting at the hit's offset.
    pub span_allow: &'static [&'static str],
    /// Suppresses the category's yielding rules when one of these matches
    /// anywhere in the input.
    pub input_allow: &'static [&'static str],
}

const fn rule(id: &'static str, pattern: &'static str) -> RuleSpec {
    RuleSpec {
        id,
        pattern,
        excluded_targets: &[],
        yields_to_input_allow: false,
    }
}

/// A rule that a help-seeking phrase elsewhere in the input switches off.
const fn yielding_rule(id: &'static str, pattern: &'static str) -> RuleSpec {
    RuleSpec {
        yields_to_input_allow: true,
        ..rule(id, pattern)
    }
}

/// Targets that turn "kill"/"poison" into systems administration, plus the
/// first-person object that belongs to the self-harm category.
const KILL_EXCLUSIONS: &[&str] = &[
    "process", "container", "docker", "pod", "service", "task", "session", "connection",
    "thread", "dns", "cache", "server", "port", "job", "screen", "tmux", "daemon", "instance",
    "vm", "build", "app", "program", "script", "command", "window", "node", "query", "queries",
    "request", "signal", "socket", "pipe", "queue", "cron", "zombie", "orphan", "tab",
    "channel", "myself",
];

/// Technical phrasing such as "how to kill all the zombie processes".
const SAFE_TECH: &[&str] = &[
    r"\bhow\s+to\s+(?:kill|stop|terminate|end|close|destroy|remove|drop|poison)\s+(?:\w+\s+){0,3}?(?:process(?:es)?|containers?|docker|pods?|services?|tasks?|sessions?|connections?|threads?|dns|cache|servers?|ports?|jobs?|screen|tmux|daemons?|instances?|vms?|builds?|apps?|programs?|scripts?|commands?|windows?|nodes?|query|queries|requests?|signal|socket|pipe|queue|cron|zombie|orphan|tab|channel)\b",
];

/// Requests for crisis support rather than methods.
const HELP_SEEKING: &[&str] = &[
    r"\b(?:suicide|crisis)\s+(?:hot\s*line|help\s*line|life\s*line|line|text\s+line|prevention|resources?|cent(?:er|re)s?)\b",
    r"\b988\b",
    r"\b(?:where|how)\s+(?:can|do|could|should)\s+i\s+(?:get|find|reach)\s+(?:help|support|someone\s+to\s+talk\s+to)\b",
    r"\b(?:talk|speak)\s+(?:to|with)\s+(?:someone|somebody|a\s+(?:counsell?or|therapist|professional|doctor))\b",
    r"\bhelp\s+(?:a\s+|my\s+)?(?:friend|someone|somebody|loved\s+one|family\s+member|partner|child|son|daughter)\s+who\b",
    r"\bhow\s+to\s+(?:stop|prevent|avoid)\s+(?:myself\s+from|thinking\s+about|wanting\s+to)\b",
];

const SELF_HARM: &[RuleSpec] = &[
    rule(
        "self_harm.suicide",
        r"\bhow\s+to\s+(?:commit\s+suicide|kill\s+myself|end\s+my\s+(?:own\s+)?life)\b",
    ),
    rule(
        "self_harm.method",
        r"\b(?:best|easiest|painless|quickest|fastest|surest)\s+(?:ways?|methods?)\s+to\s+(?:die|kill\s+myself|commit\s+suicide|end\s+(?:my\s+)?life)\b",
    ),
    rule(
        "self_harm.injury",
        r"\bhow\s+to\s+(?:cut|harm|hurt|starve)\s+myself\b",
    ),
    rule(
        "self_harm.assist",
        r"\bhelp\s+me\s+(?:kill|hurt|harm|cut|starve)\s+myself\b",
    ),
    yielding_rule(
        "self_harm.intent",
        r"\bi(?:\s+(?:want|plan|intend)|\s+am\s+going|['’]?m\s+going)\s+to\s+(?:kill|hurt|harm|cut)\s+myself\b",
    ),
    yielding_rule(
        "self_harm.ideation",
        r"\bi\s+want\s+to\s+(?:die|end\s+(?:it\s+all|my\s+life))\b",
    ),
];

const SEXUAL_EXPLOITATION: &[RuleSpec] = &[
    rule(
        "sexual_exploitation.minors",
        r"\b(?:child|minor|underage|preteen|teen(?:age)?)\s+(?:porn\w*|sex|nudes?|naked|exploitation|abuse)\b",
    ),
    rule(
        "sexual_exploitation.generate",
        r"\b(?:generate|write|create)\s+(?:sexual|explicit|erotic)\s+(?:content|story|stories|images?)\s+(?:involving|about|with)\s+(?:a\s+)?(?:child|children|minors?|kids?|underage)\b",
    ),
    rule(
        "sexual_exploitation.material",
        r"\bhow\s+to\s+(?:make|create|produce|distribute|share|find)\s+(?:child\s+)?(?:exploitation|abuse|csam|cp)\s+material\b",
    ),
    rule(
        "sexual_exploitation.grooming",
        r"\bhow\s+to\s+(?:groom|lure|seduce)\s+(?:a\s+)?(?:child|minor|kid|teen)",
    ),
];

const ILLEGAL_ACTIVITY: &[RuleSpec] = &[
    rule(
        "illegal_activity.weapons_drugs",
        r"\bhow\s+to\s+(?:make|build|create|manufacture)\s+(?:an?\s+)?(?:bombs?|explosives?|weapons?|meth|drugs)\b",
    ),
    rule(
        "illegal_activity.intrusion",
        r"\bhow\s+to\s+(?:hack|break\s+into|crack)\s+(?:someone['’]?s?\s+|a\s+|an\s+)(?:account|password|system|network|computer|server|email|phone|wifi)",
    ),
    rule(
        "illegal_activity.theft",
        r"\bhow\s+to\s+(?:steal|shoplift|rob|burglarize|pickpocket)\b",
    ),
    rule(
        "illegal_activity.forgery",
        r"\bhow\s+to\s+(?:forge|counterfeit)\s+(?:money|documents|ids|passports|currency)\b",
    ),
    rule(
        "illegal_activity.trade",
        r"\bhow\s+to\s+(?:buy|sell|obtain)\s+(?:illegal\s+)?(?:drugs|weapons|firearms)\s+(?:illegally|on\s+(?:the\s+)?(?:dark\s*web|black\s*market))",
    ),
    rule(
        "illegal_activity.laundering",
        r"\bhow\s+to\s+(?:launder|money\s*launder)\b",
    ),
    rule(
        "illegal_activity.kidnapping",
        r"\bhow\s+to\s+(?:kidnap|abduct|traffic)\b",
    ),
    rule(
        "illegal_activity.evasion",
        r"\bhow\s+to\s+(?:evade|escape\s+from|flee\s+from)\s+(?:the\s+)?(?:police|law\s+enforcement|authorities)\b",
    ),
];

const VIOLENCE: &[RuleSpec] = &[
    RuleSpec {
        id: "violence.killing",
        pattern: r"\bhow\s+to\s+(?:kill|murder|assassinate|poison)\s+(?:a\s+|an\s+|my\s+|the\s+|some)?(?P<target>\w+)",
        excluded_targets: KILL_EXCLUSIONS,
        yields_to_input_allow: false,
    },
    RuleSpec {
        id: "violence.harm",
        pattern: r"\bhow\s+to\s+(?:hurt|harm|injure|torture|maim)\s+(?:a\s+|an\s+|my\s+|the\s+|some)?(?P<target>\w+)",
        excluded_targets: &["process", "container", "myself"],
        yields_to_input_allow: false,
    },
    RuleSpec {
        id: "violence.intent",
        pattern: r"\b(?:i(?:\s+(?:want|plan|intend)|\s+am\s+going|['’]?m\s+going)\s+to|help\s+me)\s+(?:kill|murder|attack|hurt|harm)\b(?:\s+(?:(?:a|an|my|the|this|that|these|those|all)\s+)?(?P<target>\w+))?",
        excluded_targets: KILL_EXCLUSIONS,
        yields_to_input_allow: false,
    },
    rule(
        "violence.cover_up",
        r"\bhow\s+to\s+(?:get\s+away\s+with|cover\s+up)\s+(?:a\s+)?(?:murder|killing|assault)\b",
    ),
];

const HATE_SPEECH: &[RuleSpec] = &[
    rule(
        "hate_speech.dehumanizing",
        r"\b(?:all\s+)?(?:jews|muslims|blacks|whites|asians|mexicans|immigrants|gays|trans\s+people)\s+(?:are\s+)?(?:inferior|evil|disgusting|subhuman|vermin|parasites|animals)\b",
    ),
    rule(
        "hate_speech.generate",
        r"\b(?:write|generate|create)\s+(?:an?\s+)?(?:racist|antisemitic|homophobic|transphobic|xenophobic|sexist)\s+(?:joke|speech|rant|manifesto|post|message)",
    ),
    rule(
        "hate_speech.cleansing",
        r"\b(?:racial|ethnic)\s+(?:cleansing|purification|extermination)\b",
    ),
    rule(
        "hate_speech.supremacy",
        r"\b(?:white|black|jewish|muslim|christian)\s+(?:supremacy|genocide)\b",
    ),
];

const HARASSMENT: &[RuleSpec] = &[
    rule(
        "harassment.stalking",
        r"\bhow\s+to\s+(?:stalk|dox|doxx|swat)\s+(?:a\s+|some)?\w+",
    ),
    rule(
        "harassment.locating",
        r"\bhow\s+to\s+(?:find|track|locate)\s+(?:someone['’]?s?|a\s+person['’]?s?)\s+(?:home\s+)?(?:address|location|phone|workplace)",
    ),
    rule(
        "harassment.generate",
        r"\b(?:write|generate|create)\s+(?:an?\s+)?(?:harassment|threatening|intimidating|bullying)\s+(?:message|email|letter|post)",
    ),
    rule(
        "harassment.extortion",
        r"\bhow\s+to\s+(?:blackmail|extort|threaten)\s+(?:someone|a\s+person)\b",
    ),
];

const SPAM_FRAUD: &[RuleSpec] = &[
    rule(
        "spam_fraud.phishing",
        r"\b(?:write|generate|create)\s+(?:an?\s+)?(?:phishing|scam)\s+(?:email|page|site|message|sms|text)",
    ),
    rule(
        "spam_fraud.scheme",
        r"\bhow\s+to\s+(?:create|set\s+up|run)\s+(?:an?\s+)?(?:ponzi|pyramid)\s+scheme",
    ),
    rule(
        "spam_fraud.impersonation",
        r"\bhow\s+to\s+(?:impersonate|pretend\s+to\s+be)\s+(?:a\s+|the\s+|an\s+)?(?:bank|government|police|irs|fbi|official|company|authority)\b",
    ),
    rule(
        "spam_fraud.fake_documents",
        r"\b(?:write|generate|create)\s+(?:an?\s+)?(?:fake|fraudulent)\s+(?:reviews?|testimonials?|identity|document|invoice|receipt)",
    ),
];

/// Category table in evaluation order. The first category with a surviving
/// hit decides the verdict.
pub(crate) const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        category: ModerationCategory::SelfHarm,
        rules: SELF_HARM,
        span_allow: &[],
        input_allow: HELP_SEEKING,
    },
    CategorySpec {
        category: ModerationCategory::SexualExploitation,
        rules: SEXUAL_EXPLOITATION,
        span_allow: &[],
        input_allow: &[],
    },
    CategorySpec {
        category: ModerationCategory::IllegalActivity,
        rules: ILLEGAL_ACTIVITY,
        span_allow: &[],
        input_allow: &[],
    },
    CategorySpec {
        category: ModerationCategory::Violence,
        rules: VIOLENCE,
        span_allow: SAFE_TECH,
        input_allow: &[],
    },
    CategorySpec {
        category: ModerationCategory::HateSpeech,
        rules: HATE_SPEECH,
        span_allow: &[],
        input_allow: &[],
    },
    CategorySpec {
        category: ModerationCategory::Harassment,
        rules: HARASSMENT,
        span_allow: &[],
        input_allow: &[],
    },
    CategorySpec {
        category: ModerationCategory::SpamFraud,
        rules: SPAM_FRAUD,
        span_allow: &[],
        input_allow: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_evaluation_order() {
        let order: Vec<ModerationCategory> = CATEGORIES.iter().map(|c| c.category).collect();
        assert_eq!(order, ModerationCategory::EVALUATION_ORDER);
    }

    #[test]
    fn only_intent_and_ideation_yield_to_help_seeking() {
        let yielding: Vec<&str> = CATEGORIES
            .iter()
            .flat_map(|spec| spec.rules)
            .filter(|rule| rule.yields_to_input_allow)
            .map(|rule| rule.id)
            .collect();
        assert_eq!(yielding, ["self_harm.intent", "self_harm.ideation"]);
    }

    #[test]
    fn rule_ids_are_prefixed_by_category() {
        for spec in CATEGORIES {
            assert!(!spec.rules.is_empty(), "{} has no rules", spec.category);
            for rule in spec.rules {
                assert!(
                    rule.id.starts_with(&format!("{}.", spec.category)),
                    "rule {} filed under {}",
                    rule.id,
                    spec.category
                );
            }
        }
    }
}
