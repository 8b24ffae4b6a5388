//! Display helpers shared by the plain-text and terminal renderers.

use chrono::NaiveDate;

use crate::fields::AssetType;

/// Money in thousands with a dollar sign: `format_thousands(45500, 0)` is
/// `$46k`, `format_thousands(8500, 1)` is `$8.5k`. Ties round up.
pub fn format_thousands(value: u64, decimals: usize) -> String {
    // u64::MAX * 10^19 still fits in u128.
    let decimals = decimals.min(19);
    let scale = 10u128.pow(decimals as u32);
    let rounded = (u128::from(value) * scale + 500) / 1000;
    if decimals == 0 {
        format!("${rounded}k")
    } else {
        format!("${}.{:0width$}k", rounded / scale, rounded % scale, width = decimals)
    }
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let delta = (d - today).num_days();
            if delta == 0 {
                "today".into()
            } else if delta == 1 {
                "tomorrow".into()
            } else if delta > 1 {
                format!("in {}d", delta)
            } else {
                format!("{}d late", -delta)
            }
        }
    }
}

/// `Mon DD` short form used on cards, e.g. `Dec 01`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Title-cased asset type, e.g. `Brand Kit`.
pub fn format_asset_type(kind: AssetType) -> &'static str {
    match kind {
        AssetType::Prompt => "Prompt",
        AssetType::Model => "Model",
        AssetType::Workflow => "Workflow",
        AssetType::BrandKit => "Brand Kit",
        AssetType::Template => "Template",
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// A textual progress bar, `width` cells wide.
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (usize::from(progress.min(100)) * width + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}
