// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dashboard summary: totals plus the status pie and per-site bar
//! chart data.

use std::collections::BTreeMap;

use saferay_ops_domain::{Theme, count_by_site, count_by_status, site_label, site_name_map};
use saferay_ops_persistence::{DashboardSource, PersistenceError, TicketStat};
use serde::Serialize;
use tracing::debug;

/// Slice colors of the status pie, reused in order when there are more
/// statuses than colors.
pub const STATUS_PALETTE: [&str; 5] = ["#0096a2", "#facc15", "#10b981", "#f87171", "#6366f1"];

/// Bar color of the per-site chart.
pub const SITE_BAR_COLOR: &str = "#0096a2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: usize,
    pub href: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieChart {
    pub labels: Vec<String>,
    pub data: Vec<usize>,
    pub background_colors: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub data: Vec<usize>,
    pub background_color: &'static str,
}

/// Chart text and grid colors for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartTheme {
    pub text_color: &'static str,
    pub grid_color: &'static str,
}

impl ChartTheme {
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text_color: "#374151",
                grid_color: "#e5e7eb",
            },
            Theme::Dark => Self {
                text_color: "#e5e7eb",
                grid_color: "#37415133",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub cards: Vec<SummaryCard>,
    pub status_chart: PieChart,
    pub site_chart: BarChart,
    pub chart_theme: ChartTheme,
}

impl DashboardSummary {
    /// Fetches tickets, the client count, and site names, and aggregates
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an error if any fetch fails.
    pub fn load<S: DashboardSource>(source: &mut S, theme: Theme) -> Result<Self, PersistenceError> {
        let tickets: Vec<TicketStat> = source.ticket_stats()?;
        let client_count: i64 = source.count_clients()?;
        let sites: Vec<(i64, String)> = source.site_names()?;
        debug!(
            tickets = tickets.len(),
            clients = client_count,
            sites = sites.len(),
            "Loaded dashboard data"
        );
        Ok(Self::build(&tickets, client_count, sites, theme))
    }

    /// Aggregates already-fetched rows.
    #[must_use]
    pub fn build(
        tickets: &[TicketStat],
        client_count: i64,
        sites: Vec<(i64, String)>,
        theme: Theme,
    ) -> Self {
        let site_count: usize = sites.len();
        let names: BTreeMap<i64, String> =
            site_name_map(sites.into_iter().map(|(id, name)| (id, Some(name))));

        let by_status: Vec<(String, usize)> =
            count_by_status(tickets.iter().map(|t| t.status.as_deref()));
        let by_site: BTreeMap<i64, usize> = count_by_site(tickets.iter().map(|t| t.site_id));

        let status_chart: PieChart = PieChart {
            background_colors: STATUS_PALETTE
                .iter()
                .copied()
                .cycle()
                .take(by_status.len())
                .collect(),
            labels: by_status.iter().map(|(label, _)| label.clone()).collect(),
            data: by_status.iter().map(|(_, count)| *count).collect(),
        };

        let site_chart: BarChart = BarChart {
            label: "Tickets",
            labels: by_site.keys().map(|id| site_label(&names, *id)).collect(),
            data: by_site.values().copied().collect(),
            background_color: SITE_BAR_COLOR,
        };

        Self {
            cards: vec![
                SummaryCard {
                    label: "Total Tickets",
                    value: tickets.len(),
                    href: "/dashboard/tickets",
                },
                SummaryCard {
                    label: "Total Clients",
                    value: usize::try_from(client_count).unwrap_or(0),
                    href: "/dashboard/clients",
                },
                SummaryCard {
                    label: "Total Sites",
                    value: site_count,
                    href: "/dashboard/sites",
                },
            ],
            status_chart,
            site_chart,
            chart_theme: ChartTheme::for_theme(theme),
        }
    }
}
