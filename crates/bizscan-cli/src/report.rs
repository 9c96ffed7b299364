//! Summary statistics printed after a collection run.

use std::collections::HashMap;
use std::fmt::Write as _;

use bizscan_core::BusinessRecord;

const TOP_NICHES: usize = 5;

/// Aggregate view over the finalized records.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Summary {
    pub total: usize,
    /// `(county, listings)`, most listings first; ties by county name.
    pub per_county: Vec<(String, usize)>,
    /// Averages skip records where the field is absent or zero.
    pub avg_price: Option<f64>,
    pub avg_sde: Option<f64>,
    pub avg_revenue: Option<f64>,
    pub avg_multiplier: Option<f64>,
    /// At most five `(niche, listings)` pairs, most listings first.
    pub top_niches: Vec<(String, usize)>,
}

impl Summary {
    #[must_use]
    pub fn from_records(records: &[BusinessRecord]) -> Self {
        let per_county = ranked_counts(records.iter().map(|r| r.county.as_str()));
        let mut top_niches = ranked_counts(records.iter().filter_map(|r| r.niche.as_deref()));
        top_niches.truncate(TOP_NICHES);

        Self {
            total: records.len(),
            per_county,
            avg_price: average_amount(records.iter().map(|r| r.price)),
            avg_sde: average_amount(records.iter().map(|r| r.sde)),
            avg_revenue: average_amount(records.iter().map(|r| r.revenue)),
            avg_multiplier: average(records.iter().filter_map(|r| r.multiplier)),
            top_niches,
        }
    }

    /// Human-readable multi-line report.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Collection summary");
        let _ = writeln!(out, "  total listings: {}", self.total);
        if self.total == 0 {
            return out;
        }

        let _ = writeln!(out, "  listings by county:");
        for (county, count) in &self.per_county {
            let _ = writeln!(out, "    {county:<24} {count}");
        }

        let _ = writeln!(out, "  averages:");
        let _ = writeln!(out, "    price:      {}", dollars_or_dash(self.avg_price));
        let _ = writeln!(out, "    sde:        {}", dollars_or_dash(self.avg_sde));
        let _ = writeln!(out, "    revenue:    {}", dollars_or_dash(self.avg_revenue));
        let multiplier = self
            .avg_multiplier
            .map_or_else(|| "-".to_owned(), |m| format!("{m:.2}x"));
        let _ = writeln!(out, "    multiplier: {multiplier}");

        if !self.top_niches.is_empty() {
            let _ = writeln!(out, "  top niches:");
            for (niche, count) in &self.top_niches {
                let _ = writeln!(out, "    {niche:<24} {count}");
            }
        }
        out
    }
}

pub(crate) fn print_summary(summary: &Summary) {
    print!("{}", summary.render());
}

fn ranked_counts<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_owned(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

#[allow(clippy::cast_precision_loss)]
fn average_amount(values: impl Iterator<Item = Option<u64>>) -> Option<f64> {
    average(values.flatten().filter(|v| *v > 0).map(|v| v as f64))
}

#[allow(clippy::cast_precision_loss)]
fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn dollars_or_dash(value: Option<f64>) -> String {
    value.map_or_else(
        || "-".to_owned(),
        |v| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let whole = v.round() as u64;
            format!("${}", format_thousands(whole))
        },
    )
}

/// `1234567` → `"1,234,567"`.
pub(crate) fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
