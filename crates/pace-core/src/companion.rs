//! Companion: short conversational replies about a user's score
//!
//! Replies are canned templates selected by keywords in the user's message,
//! prefixed in the user's chosen tone. Nothing is generated; the same
//! message and context always produce the same reply.

use serde::{Deserialize, Serialize};

use crate::engine::HealthAssessment;
use crate::models::{Breakdown, Metric, Risk, Tone};
use crate::narrative::Driver;
use crate::streaks::Streaks;

pub const MAX_TIPS: usize = 3;

const TIP_RULES: &[(Metric, u8, &str)] = &[
    (Metric::Cushion, 40, "Your cushion is thin. Park a little extra after payday."),
    (Metric::Acceleration, 45, "Spend is running ahead of budget. Try one low-spend day."),
    (Metric::Consistency, 50, "Your pace swings a lot. A steady daily cap will smooth it."),
];

/// What the companion knows about the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionContext {
    pub name: String,
    pub tone: Tone,
    pub score: u8,
    pub risk: Risk,
    pub streaks: Streaks,
    pub drivers: Vec<Driver>,
}

impl CompanionContext {
    pub fn from_assessment(name: &str, tone: Tone, assessment: &HealthAssessment) -> Self {
        Self {
            name: name.to_string(),
            tone,
            score: assessment.score,
            risk: assessment.risk,
            streaks: assessment.streaks,
            drivers: assessment.drivers.clone(),
        }
    }
}

/// Threshold-gated tips, at most three (may be empty)
pub fn tips(breakdown: &Breakdown) -> Vec<String> {
    TIP_RULES
        .iter()
        .filter(|(metric, threshold, _)| breakdown.get(*metric).is_some_and(|v| v < *threshold))
        .map(|(_, _, tip)| tip.to_string())
        .take(MAX_TIPS)
        .collect()
}

fn tone_prefix(tone: Tone) -> &'static str {
    match tone {
        Tone::Calm => "Calm check-in:",
        Tone::Direct => "Direct read:",
        Tone::Playful => "Quick vibe:",
        Tone::Coach => "Coach mode:",
    }
}

fn driver_line(ctx: &CompanionContext) -> String {
    match ctx.drivers.first() {
        Some(top) => format!("Top driver: {} ({}).", top.name, top.value),
        None => "Your drivers look balanced right now.".to_string(),
    }
}

fn canned_lines(ctx: &CompanionContext, prefix: &str, name: &str) -> [String; 10] {
    [
        format!(
            "{} Hey {}, your current score is {}. {}",
            prefix,
            name,
            ctx.score,
            driver_line(ctx)
        ),
        format!(
            "{} You're at {}/100. Keep a steady pace for 48 hours to lift stability.",
            prefix, ctx.score
        ),
        format!(
            "{} Risk is {}. A small buffer transfer this week will help.",
            prefix, ctx.risk
        ),
        format!(
            "{} Stable streak: {} days. Keep it alive with one calm check today.",
            prefix, ctx.streaks.stable
        ),
        format!(
            "{} Adjustments streak: {} days. You're responding early, keep that rhythm.",
            prefix, ctx.streaks.adjust
        ),
        format!(
            "{} Goal streak: {} days. A tiny goal deposit keeps momentum positive.",
            prefix, ctx.streaks.goal
        ),
        format!(
            "{} If you trim 5% on flexible spend, your drift should soften this week.",
            prefix
        ),
        format!(
            "{} If income rises 5%, your cushion trend improves over the next 4 weeks.",
            prefix
        ),
        format!(
            "{} I can show risk drivers or build a plan. Your call.",
            prefix
        ),
        format!(
            "{} You're not behind. You're building a clearer signal.",
            prefix
        ),
    ]
}

/// Reply to a free-text message
pub fn respond(message: &str, ctx: &CompanionContext) -> String {
    let msg = message.trim().to_lowercase();
    let prefix = tone_prefix(ctx.tone);

    if msg.contains("explain") || msg.contains("score") {
        return format!(
            "{} Your score blends stability, drift, cushion, and consistency. {}",
            prefix,
            driver_line(ctx)
        );
    }
    if msg.contains("scenario") || msg.contains("what if") {
        return format!(
            "{} Try a 5% expense reduction scenario. It typically lifts runway by 1-2 points.",
            prefix
        );
    }
    if msg.contains("risk") || msg.contains("driver") {
        return format!(
            "{} {} Lowering fixed ratio usually improves risk first.",
            prefix,
            driver_line(ctx)
        );
    }
    if msg.contains("plan") {
        return format!(
            "{} Plan: set a weekly pace, cap flexible spend, and add a small buffer transfer.",
            prefix
        );
    }

    let name = if ctx.name.trim().is_empty() {
        "there"
    } else {
        ctx.name.trim()
    };
    let lines = canned_lines(ctx, prefix, name);
    let index = ctx.score as usize % lines.len();
    lines[index].clone()
}
