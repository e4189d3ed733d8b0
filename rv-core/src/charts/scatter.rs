//! Scatter plot: GDP per capita against population density, sized and
//! coloured by the selected metric.

use super::RenderContext;
use crate::record::Record;
use crate::scene::{format_thousands, metric_line, PointMark, ScatterScene};
use crate::transform::{filter_by_continent, max_value, sort_desc_by, trim_outliers, TransformError};

/// Circle radius range in pixels (sqrt scale).
pub const RADIUS_RANGE: (f64, f64) = (4.0, 20.0);

/// Points kept after the continent filter and the upper-fence trim on both
/// axes. The fences are computed from the continent-filtered set.
pub fn scatter_points<'a>(
    records: &'a [Record],
    ctx: &RenderContext<'_>,
    metric_field: &str,
) -> Vec<&'a Record> {
    let x = ctx.config.scatter_x_field.as_str();
    let y = ctx.config.scatter_y_field.as_str();
    let filtered = filter_by_continent(records, &ctx.selection.continent);
    let mut kept = trim_outliers(filtered, &[x, y], ctx.config.outlier_k);
    // Larger circles first so smaller ones stay on top.
    sort_desc_by(&mut kept, metric_field);
    kept
}

pub fn scatter_scene(
    records: &[Record],
    ctx: &RenderContext<'_>,
) -> Result<ScatterScene, TransformError> {
    let metric = ctx.metric()?;
    let x_field = ctx.config.scatter_x_field.as_str();
    let y_field = ctx.config.scatter_y_field.as_str();
    let kept = scatter_points(records, ctx, metric.field);

    let points = kept
        .iter()
        .map(|r| {
            let x = r.value_or_zero(x_field);
            let y = r.value_or_zero(y_field);
            let value = r.value_or_zero(metric.field);
            PointMark {
                name: r.name.clone(),
                continent: r.continent.clone(),
                x,
                y,
                value,
                color: metric.scale.color(value),
                tooltip: format!(
                    "{}\nGDP per Capita: ${}\nPopulation Density: {}/km²\n{}",
                    r.name,
                    format_thousands(x),
                    format_thousands(y),
                    metric_line(metric.label, value)
                ),
            }
        })
        .collect();

    Ok(ScatterScene {
        frame: ctx.frame,
        metric: metric.label.to_string(),
        field: metric.field.to_string(),
        x_field: x_field.to_string(),
        y_field: y_field.to_string(),
        points,
        x_domain: (0.0, max_value(&kept, x_field)),
        y_domain: (0.0, max_value(&kept, y_field)),
        radius_domain: (0.0, max_value(&kept, metric.field)),
        radius_range: RADIUS_RANGE,
        legend: ctx.legend(&metric),
        transition_ms: ctx.config.transition_ms,
    })
}
