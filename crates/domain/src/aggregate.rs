// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group-and-count helpers behind the dashboard charts.

use std::collections::BTreeMap;

/// Label used for tickets with no status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Counts tickets per status.
///
/// Missing or blank statuses are counted under `"Unknown"`. Buckets appear
/// in the order their status is first seen.
#[must_use]
pub fn count_by_status<'a, I>(statuses: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut buckets: Vec<(String, usize)> = Vec::new();
    for status in statuses {
        let label: &str = status.filter(|s| !s.is_empty()).unwrap_or(UNKNOWN_STATUS);
        match buckets.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, count)) => *count += 1,
            None => buckets.push((label.to_string(), 1)),
        }
    }
    buckets
}

/// Counts tickets per site, skipping tickets with no site.
#[must_use]
pub fn count_by_site<I>(site_ids: I) -> BTreeMap<i64, usize>
where
    I: IntoIterator<Item = Option<i64>>,
{
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for site_id in site_ids.into_iter().flatten() {
        *counts.entry(site_id).or_insert(0) += 1;
    }
    counts
}

/// Builds the site id to display name map.
///
/// Sites with a blank name fall back to `Site {id}`.
#[must_use]
pub fn site_name_map<I>(sites: I) -> BTreeMap<i64, String>
where
    I: IntoIterator<Item = (i64, Option<String>)>,
{
    sites
        .into_iter()
        .map(|(id, name)| {
            let label: String = name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| fallback_site_label(id));
            (id, label)
        })
        .collect()
}

/// Returns the display label for a site id.
#[must_use]
pub fn site_label(names: &BTreeMap<i64, String>, site_id: i64) -> String {
    names
        .get(&site_id)
        .cloned()
        .unwrap_or_else(|| fallback_site_label(site_id))
}

fn fallback_site_label(site_id: i64) -> String {
    format!("Site {site_id}")
}
