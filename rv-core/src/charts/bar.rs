//! Bar chart: continent aggregates, drilling into the top countries of one
//! continent.

use super::RenderContext;
use crate::record::Record;
use crate::scene::{metric_line, BarMark, BarScene, ViewMode};
use crate::selection::ContinentFilter;
use crate::transform::{filter_by_continent, max_value, sort_desc_by, top_n, TransformError};

impl ViewMode {
    /// Mode implied by the continent filter: aggregates for `All`, countries
    /// otherwise.
    pub fn for_filter(filter: &ContinentFilter) -> Self {
        if filter.is_all() {
            ViewMode::Continent
        } else {
            ViewMode::Country
        }
    }

    /// Clicking an aggregate bar. Returns the filter to apply, or `None` when
    /// already drilled down.
    pub fn drill_down(self, continent: &str) -> Option<ContinentFilter> {
        match self {
            ViewMode::Continent => Some(ContinentFilter::parse(continent)).filter(|f| !f.is_all()),
            ViewMode::Country => None,
        }
    }

    /// The back action. Returns the filter to apply, or `None` when already
    /// showing aggregates.
    pub fn drill_up(self) -> Option<ContinentFilter> {
        match self {
            ViewMode::Country => Some(ContinentFilter::All),
            ViewMode::Continent => None,
        }
    }
}

/// Rows shown by the bar chart and the mode they were produced in.
pub fn bar_rows<'a>(
    countries: &'a [Record],
    continents: &'a [Record],
    filter: &ContinentFilter,
    field: &str,
    n: usize,
) -> (ViewMode, Vec<&'a Record>) {
    match ViewMode::for_filter(filter) {
        ViewMode::Continent => {
            let mut rows: Vec<&Record> = continents.iter().collect();
            sort_desc_by(&mut rows, field);
            (ViewMode::Continent, rows)
        }
        ViewMode::Country => {
            let mut rows = filter_by_continent(countries, filter);
            sort_desc_by(&mut rows, field);
            (ViewMode::Country, top_n(rows, n))
        }
    }
}

pub fn bar_scene(
    countries: &[Record],
    continents: &[Record],
    ctx: &RenderContext<'_>,
) -> Result<BarScene, TransformError> {
    let metric = ctx.metric()?;
    let (mode, rows) = bar_rows(
        countries,
        continents,
        &ctx.selection.continent,
        metric.field,
        ctx.config.top_n,
    );
    let y_max = max_value(&rows, metric.field) * ctx.config.bar_headroom;

    let bars = rows
        .iter()
        .map(|r| {
            let value = r.value_or_zero(metric.field);
            BarMark {
                name: r.name.clone(),
                // Aggregate rows are named after their continent.
                continent: r.continent.clone().or_else(|| Some(r.name.clone())),
                value,
                color: metric.scale.color(value),
                tooltip: format!("{}\n{}", r.name, metric_line(metric.label, value)),
            }
        })
        .collect();

    Ok(BarScene {
        frame: ctx.frame,
        metric: metric.label.to_string(),
        field: metric.field.to_string(),
        mode,
        bars,
        y_domain: (0.0, y_max),
        clickable: mode == ViewMode::Continent,
        show_back: mode == ViewMode::Country,
        legend: ctx.legend(&metric),
        transition_ms: ctx.config.transition_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::metric::MetricRegistry;
    use crate::selection::Selection;
    use crate::charts::ChartKind;

    const FIELD: &str = "RecyclingRates_EPIRecyclingScore_2022";
    const LABEL: &str = "Recycling Score (2022)";

    fn countries() -> Vec<Record> {
        (0..14)
            .map(|i| Record::new(&format!("EU{i}"), Some("Europe")).with(FIELD, i as f64))
            .chain([Record::new("Peru", Some("South America")).with(FIELD, 99.0)])
            .collect()
    }

    fn continents() -> Vec<Record> {
        vec![
            Record::new("Africa", Some("Africa")).with(FIELD, 10.0),
            Record::new("Europe", Some("Europe")).with(FIELD, 50.0),
            Record::new("Oceania", Some("Oceania")),
        ]
    }

    fn scene(filter: &str) -> BarScene {
        let config = DashboardConfig::default();
        let registry = MetricRegistry::default();
        let selection = Selection::new(LABEL).with_continent(ContinentFilter::parse(filter));
        let ctx = RenderContext {
            chart_id: "bar",
            selection: &selection,
            registry: &registry,
            config: &config,
            frame: ChartKind::Bar.frame(&config),
        };
        bar_scene(&countries(), &continents(), &ctx).unwrap()
    }

    #[test]
    fn all_shows_sorted_aggregates() {
        let s = scene("all");
        assert_eq!(s.mode, ViewMode::Continent);
        let names: Vec<&str> = s.bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Europe", "Africa", "Oceania"]);
        assert!(s.clickable && !s.show_back);
        assert_eq!(s.bars[2].value, 0.0);
        assert!((s.y_domain.1 - 55.0).abs() < 1e-9);
    }

    #[test]
    fn continent_shows_top_ten_countries() {
        let s = scene("Europe");
        assert_eq!(s.mode, ViewMode::Country);
        assert_eq!(s.bars.len(), 10);
        assert_eq!(s.bars[0].name, "EU13");
        assert_eq!(s.bars[9].name, "EU4");
        assert!(s.bars.iter().all(|b| b.continent.as_deref() == Some("Europe")));
        assert!(s.show_back && !s.clickable);
    }

    #[test]
    fn small_continent_shows_everything() {
        let s = scene("South America");
        assert_eq!(s.bars.len(), 1);
    }

    #[test]
    fn empty_continent_renders_no_bars() {
        let s = scene("Antarctica");
        assert!(s.bars.is_empty());
        assert_eq!(s.y_domain, (0.0, 0.0));
    }

    #[test]
    fn drill_transitions() {
        assert_eq!(
            ViewMode::Continent.drill_down("Asia"),
            Some(ContinentFilter::parse("Asia"))
        );
        assert_eq!(ViewMode::Country.drill_down("Asia"), None);
        assert_eq!(ViewMode::Continent.drill_down("all"), None);
        assert_eq!(ViewMode::Country.drill_up(), Some(ContinentFilter::All));
        assert_eq!(ViewMode::Continent.drill_up(), None);
        assert_eq!(ViewMode::default(), ViewMode::Continent);
    }
}
