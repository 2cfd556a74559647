use std::io;

use plotters::coord::CoordTranslate;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::model::roc::RocCurve;

const SIZE: (u32, u32) = (960, 420);
/// Zero rates are drawn on this floor in the log-log panel.
pub const LOG_FLOOR: f64 = 1e-5;

/// Two side by side panels, linear and log-log, one line per curve.
pub fn render_roc_svg(curves: &[(&str, &RocCurve)]) -> io::Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;
        let panels = root.split_evenly((1, 2));

        let mut linear = ChartBuilder::on(&panels[0])
            .caption("ROC", ("sans-serif", 18))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.0f64)
            .map_err(plot_error)?;
        linear
            .configure_mesh()
            .x_desc("False Positive Rate")
            .y_desc("True Positive Rate")
            .draw()
            .map_err(plot_error)?;
        draw_curves(&mut linear, curves, 0.0, |p| p)?;
        if curves.len() > 1 {
            linear
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(plot_error)?;
        }

        let mut log = ChartBuilder::on(&panels[1])
            .caption("ROC (log-log)", ("sans-serif", 18))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(
                (LOG_FLOOR..1.0f64).log_scale(),
                (LOG_FLOOR..1.0f64).log_scale(),
            )
            .map_err(plot_error)?;
        log.configure_mesh()
            .x_desc("False Positive Rate")
            .draw()
            .map_err(plot_error)?;
        draw_curves(&mut log, curves, LOG_FLOOR, log_point)?;

        root.present().map_err(plot_error)?;
    }
    Ok(svg)
}

/// Clamps a ROC point onto the visible log-log range.
pub fn log_point((fpr, tpr): (f64, f64)) -> (f64, f64) {
    (fpr.max(LOG_FLOOR), tpr.max(LOG_FLOOR))
}

fn draw_curves<CT>(
    chart: &mut ChartContext<'_, SVGBackend<'_>, CT>,
    curves: &[(&str, &RocCurve)],
    low: f64,
    map: fn((f64, f64)) -> (f64, f64),
) -> io::Result<()>
where
    CT: CoordTranslate<From = (f64, f64)>,
{
    // Chance level is the diagonal in both scales.
    chart
        .draw_series(DashedLineSeries::new(
            [(low, low), (1.0, 1.0)],
            2,
            4,
            RGBColor(128, 128, 128).stroke_width(1),
        ))
        .map_err(plot_error)?;

    for (i, (name, curve)) in curves.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        chart
            .draw_series(LineSeries::new(curve.points().map(map), &color))
            .map_err(plot_error)?
            .label(name.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    Ok(())
}

fn plot_error<E: std::fmt::Display>(err: E) -> io::Error {
    io::Error::other(format!("ROC plot: {err}"))
}
