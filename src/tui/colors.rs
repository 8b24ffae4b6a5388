//! Color choices for the terminal user interface.
//!
//! The core hands out classifications; this is the only place they become
//! colours.

use ratatui::style::Color;

use crate::classify::{Badge, Classification, Emphasis};

/// Used for Positive badges.
pub const GREEN: Color = Color::Rgb(74, 222, 128);
/// Used for Attention badges.
pub const AMBER: Color = Color::Rgb(250, 204, 21);
/// Used for strong Attention badges (high priority).
pub const RED: Color = Color::Rgb(248, 113, 113);
/// Used for Informational badges.
pub const BLUE: Color = Color::Rgb(96, 165, 250);
/// Used for Neutral badges.
pub const GREY: Color = Color::Rgb(156, 163, 175);

/// Accent for the active tab and headings.
pub const PURPLE: Color = Color::Rgb(168, 85, 247);
/// Accent for money figures.
pub const MONEY: Color = GREEN;

pub fn classification_color(classification: Classification) -> Color {
    match classification {
        Classification::Positive => GREEN,
        Classification::Attention => AMBER,
        Classification::Informational => BLUE,
        Classification::Neutral => GREY,
    }
}

pub fn badge_color(badge: Badge) -> Color {
    match (badge.classification, badge.emphasis) {
        (Classification::Attention, Emphasis::Strong) => RED,
        (classification, _) => classification_color(classification),
    }
}
