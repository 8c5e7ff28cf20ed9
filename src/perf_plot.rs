use crate::perf::ProfileData;
use crate::perf_style::{self, ChartStyle, FONT};
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::full_palette::{GREY, ORANGE, PURPLE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

// Figure sizes in pixels: inch dimensions multiplied out at 300 DPI.
const OVERVIEW_SIZE: (u32, u32) = (4800, 3600); // 16 x 12 in
const INDIVIDUAL_SIZE: (u32, u32) = (5400, 1500); // 18 x 5 in
const COMPARISON_SIZE: (u32, u32) = (3600, 2400); // 12 x 8 in

const LINE_STROKE_OVERVIEW: u32 = 10; // 2.5 pt
const LINE_STROKE_INDIVIDUAL: u32 = 12; // 3 pt
const REF_STROKE: u32 = 8; // 2 pt, dashed reference lines
const MARKER_OVERVIEW: i32 = 21;
const MARKER_INDIVIDUAL: i32 = 25;
const DASH_LEN: i32 = 25;
const DASH_GAP: i32 = 15;
const BAR_GAP: u32 = 40;
const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type PlotResult = Result<(), Box<dyn Error>>;

/// Which figure a panel is drawn for. The individual figure reuses the
/// overview panels with thicker lines, larger markers, shorter legend labels
/// and no annotation box.
#[derive(Clone, Copy, PartialEq)]
enum PanelKind {
    Overview,
    Individual,
}

/// The 2x2 overview figure: execution time, speedup, efficiency, degradation.
pub fn write_overview(data: &ProfileData, style: &ChartStyle, path: &Path) -> PlotResult {
    let root = BitMapBackend::new(path, OVERVIEW_SIZE).into_drawing_area();
    root.fill(&style.figure_bg)?;

    let panels = root.split_evenly((2, 2));
    draw_time_panel(&panels[0], data, style, PanelKind::Overview)?;
    draw_speedup_panel(&panels[1], data, style, PanelKind::Overview)?;
    draw_efficiency_panel(&panels[2], data, style, PanelKind::Overview)?;
    draw_degradation_panel(&panels[3], data, style)?;

    root.present()?;
    Ok(())
}

/// The 1x3 row of individual charts: time, speedup, efficiency.
pub fn write_individual(data: &ProfileData, style: &ChartStyle, path: &Path) -> PlotResult {
    let root = BitMapBackend::new(path, INDIVIDUAL_SIZE).into_drawing_area();
    root.fill(&style.figure_bg)?;

    let panels = root.split_evenly((1, 3));
    draw_time_panel(&panels[0], data, style, PanelKind::Individual)?;
    draw_speedup_panel(&panels[1], data, style, PanelKind::Individual)?;
    draw_efficiency_panel(&panels[2], data, style, PanelKind::Individual)?;

    root.present()?;
    Ok(())
}

/// The grouped-bar comparison of speedup and efficiency per thread count.
pub fn write_comparison(data: &ProfileData, style: &ChartStyle, path: &Path) -> PlotResult {
    let root = BitMapBackend::new(path, COMPARISON_SIZE).into_drawing_area();
    root.fill(&style.figure_bg)?;

    let n = data.points.len();
    let width = 0.35;
    let bar_max =
        data.points.iter().map(|m| m.speedup.max(m.efficiency)).fold(0.0, f64::max);
    // The axis always covers the y=1 serial baseline.
    let y_max = bar_max.max(1.0) * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption("Speedup and Efficiency Comparison", perf_style::bold(14).color(&style.text))
        .margin(pt(4))
        .x_label_area_size(pt(28))
        .y_label_area_size(pt(32))
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)?;

    chart.plotting_area().fill(&style.panel_bg)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(style.grid.mix(style.grid_alpha))
        .bold_line_style(style.grid.mix(style.grid_alpha))
        .x_label_formatter(&|_| String::new())
        .y_labels(10)
        .x_desc("Number of Threads (p)")
        .y_desc("Normalized Performance Metric")
        .axis_desc_style(perf_style::bold(12).color(&style.text))
        .label_style((FONT, perf_style::scaled(9)).into_font().color(&style.text))
        .draw()?;

    chart
        .draw_series(data.points.iter().enumerate().map(|(i, m)| {
            Rectangle::new([(i as f64 - width, 0.0), (i as f64, m.speedup)], BLUE.mix(0.7).filled())
        }))?
        .label("Speedup (S)")
        .legend(move |(x, y)| legend_box(x, y, BLUE.mix(0.7)));
    chart
        .draw_series(data.points.iter().enumerate().map(|(i, m)| {
            Rectangle::new(
                [(i as f64, 0.0), (i as f64 + width, m.efficiency)],
                PURPLE.mix(0.7).filled(),
            )
        }))?
        .label("Efficiency (E)")
        .legend(move |(x, y)| legend_box(x, y, PURPLE.mix(0.7)));
    chart
        .draw_series(DashedLineSeries::new(
            vec![(-0.5, 1.0), (n as f64 - 0.5, 1.0)],
            DASH_LEN,
            DASH_GAP,
            RED.stroke_width(REF_STROKE),
        ))?
        .label("Baseline (Serial)")
        .legend(move |(x, y)| legend_line(x, y, RED));

    let value_font = value_label_font(style);
    let plot = chart.plotting_area();
    for (i, m) in data.points.iter().enumerate() {
        let x = i as f64;
        plot.draw(&Text::new(
            format!("{:.3}", m.speedup),
            (x - width / 2.0, m.speedup),
            value_font.clone(),
        ))?;
        plot.draw(&Text::new(
            format!("{:.3}", m.efficiency),
            (x + width / 2.0, m.efficiency),
            value_font.clone(),
        ))?;
    }

    // Group labels go under the axis by hand since the x coordinate is
    // continuous and the default tick positions do not line up with the bars.
    let tick_font = TextStyle::from((FONT, perf_style::scaled(9)).into_font())
        .color(&style.text)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, m) in data.points.iter().enumerate() {
        let (px, py) = chart.plotting_area().map_coordinate(&(i as f64, 0.0));
        root.draw(&Text::new(m.threads.to_string(), (px, py + pt(2)), tick_font.clone()))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, perf_style::scaled(10)).into_font().color(&style.text))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_time_panel(
    area: &Panel<'_>,
    data: &ProfileData,
    style: &ChartStyle,
    kind: PanelKind,
) -> PlotResult {
    let ms = data.parallel_ms();
    let serial_ms = data.serial_ms();
    let slots = ms.len() as u32 + 1; // leading slot for the serial bar
    let y_max = ms.iter().copied().fold(serial_ms, f64::max) * 1.15;

    let (title, y_desc, suffix) = match kind {
        PanelKind::Overview => {
            ("Execution Time: Serial vs Parallel", "Execution Time (milliseconds)", "ms")
        }
        PanelKind::Individual => ("Execution Time Comparison", "Execution Time (ms)", ""),
    };

    let mut chart = ChartBuilder::on(area)
        .caption(title, perf_style::bold(14).color(&style.text))
        .margin(pt(4))
        .x_label_area_size(pt(28))
        .y_label_area_size(pt(32))
        .build_cartesian_2d((0u32..slots).into_segmented(), 0.0..y_max)?;

    chart.plotting_area().fill(&style.panel_bg)?;

    let labels: Vec<String> = std::iter::once("Serial".to_owned())
        .chain(data.points.iter().map(|m| m.threads.to_string()))
        .collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(style.grid.mix(style.grid_alpha))
        .bold_line_style(style.grid.mix(style.grid_alpha))
        .x_labels(slots as usize + 2)
        .y_labels(10)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) if (*i as usize) < labels.len() => {
                labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .x_desc("Number of Threads")
        .y_desc(y_desc)
        .axis_desc_style(perf_style::bold(12).color(&style.text))
        .label_style((FONT, perf_style::scaled(9)).into_font().color(&style.text))
        .draw()?;

    let anno = chart.draw_series(std::iter::once(bar(0, serial_ms, GREEN.mix(0.7).filled())))?;
    if kind == PanelKind::Overview {
        anno.label("Serial (T_S)").legend(move |(x, y)| legend_box(x, y, GREEN.mix(0.7)));
    }

    let anno = chart.draw_series(
        ms.iter().enumerate().map(|(i, &v)| bar(i as u32 + 1, v, RED.mix(0.7).filled())),
    )?;
    if kind == PanelKind::Overview {
        anno.label("Parallel (T_P)").legend(move |(x, y)| legend_box(x, y, RED.mix(0.7)));
    }

    let anno = chart.draw_series(DashedLineSeries::new(
        vec![(SegmentValue::Exact(0), serial_ms), (SegmentValue::Exact(slots), serial_ms)],
        DASH_LEN,
        DASH_GAP,
        GREEN.stroke_width(REF_STROKE),
    ))?;
    if kind == PanelKind::Overview {
        anno.label("Serial Baseline").legend(move |(x, y)| legend_line(x, y, GREEN));
    }

    let value_font = value_label_font(style);
    let plot = chart.plotting_area();
    plot.draw(&Text::new(
        format!("{serial_ms:.3}{suffix}"),
        (SegmentValue::CenterOf(0), serial_ms),
        value_font.color(&GREEN),
    ))?;
    for (i, &v) in ms.iter().enumerate() {
        plot.draw(&Text::new(
            format!("{v:.3}{suffix}"),
            (SegmentValue::CenterOf(i as u32 + 1), v),
            value_font.clone(),
        ))?;
    }

    if kind == PanelKind::Overview {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, perf_style::scaled(10)).into_font().color(&style.text))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

fn draw_speedup_panel(
    area: &Panel<'_>,
    data: &ProfileData,
    style: &ChartStyle,
    kind: PanelKind,
) -> PlotResult {
    let threads = data.thread_counts();
    let pts: Vec<(u32, f64)> = data.points.iter().map(|m| (m.threads, m.speedup)).collect();
    let ideal: Vec<(u32, f64)> =
        data.points.iter().map(|m| (m.threads, f64::from(m.threads))).collect();
    let x_max = *threads.last().unwrap() + 1;
    let y_max = ideal.last().unwrap().1 * 1.1;

    let (title, stroke, marker, measured, ideal_label, baseline_label) = match kind {
        PanelKind::Overview => (
            "Speedup vs Number of Threads",
            LINE_STROKE_OVERVIEW,
            MARKER_OVERVIEW,
            "Measured Speedup",
            "Ideal Linear Speedup",
            "No Speedup (Baseline)",
        ),
        PanelKind::Individual => (
            "Speedup Analysis",
            LINE_STROKE_INDIVIDUAL,
            MARKER_INDIVIDUAL,
            "Measured",
            "Ideal (Linear)",
            "Baseline",
        ),
    };

    let mut chart = ChartBuilder::on(area)
        .caption(title, perf_style::bold(14).color(&style.text))
        .margin(pt(4))
        .x_label_area_size(pt(28))
        .y_label_area_size(pt(32))
        .build_cartesian_2d(1u32..x_max, 0.0..y_max)?;

    chart.plotting_area().fill(&style.panel_bg)?;
    chart
        .configure_mesh()
        .light_line_style(style.grid.mix(style.grid_alpha))
        .bold_line_style(style.grid.mix(style.grid_alpha))
        .x_labels(x_max as usize)
        .y_labels(10)
        .x_label_formatter(&|v| if threads.contains(v) { v.to_string() } else { String::new() })
        .x_desc("Number of Threads (p)")
        .y_desc("Speedup (S = T_S / T_P)")
        .axis_desc_style(perf_style::bold(12).color(&style.text))
        .label_style((FONT, perf_style::scaled(9)).into_font().color(&style.text))
        .draw()?;

    chart
        .draw_series(LineSeries::new(pts.clone(), BLUE.stroke_width(stroke)))?
        .label(measured)
        .legend(move |(x, y)| legend_line(x, y, BLUE));
    chart.draw_series(PointSeries::of_element(
        pts.clone(),
        marker,
        BLUE.filled(),
        &|coord, size, st| EmptyElement::at(coord) + Circle::new((0, 0), size, st),
    ))?;
    chart
        .draw_series(DashedLineSeries::new(
            vec![(1u32, 1.0), (x_max, 1.0)],
            DASH_LEN,
            DASH_GAP,
            RED.stroke_width(REF_STROKE),
        ))?
        .label(baseline_label)
        .legend(move |(x, y)| legend_line(x, y, RED));
    chart
        .draw_series(DashedLineSeries::new(
            ideal.clone(),
            DASH_LEN,
            DASH_GAP,
            GREY.stroke_width(REF_STROKE),
        ))?
        .label(ideal_label)
        .legend(move |(x, y)| legend_line(x, y, GREY));

    let value_font = value_label_font(style);
    let plot = chart.plotting_area();
    for &(t, s) in &pts {
        plot.draw(&Text::new(format!("{s:.3}"), (t, s), value_font.clone()))?;
    }

    if kind == PanelKind::Overview {
        // Note box flagging that every measured point sits below the
        // no-speedup threshold.
        let span = x_max - 1;
        let x0 = 1 + span / 4;
        let x1 = x_max - span / 4;
        let xc = (x0 + x1) / 2;
        plot.draw(&Rectangle::new(
            [(x0, y_max * 0.84), (x1, y_max * 0.97)],
            YELLOW.mix(0.3).filled(),
        ))?;
        plot.draw(&PathElement::new(
            vec![
                (x0, y_max * 0.84),
                (x1, y_max * 0.84),
                (x1, y_max * 0.97),
                (x0, y_max * 0.97),
                (x0, y_max * 0.84),
            ],
            BLACK,
        ))?;
        let note = TextStyle::from((FONT, perf_style::scaled(10)).into_font())
            .color(&style.text)
            .pos(Pos::new(HPos::Center, VPos::Center));
        plot.draw(&Text::new("Speedup < 1.0 indicates", (xc, y_max * 0.935), note.clone()))?;
        plot.draw(&Text::new("parallel version is slower", (xc, y_max * 0.875), note))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, perf_style::scaled(10)).into_font().color(&style.text))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_efficiency_panel(
    area: &Panel<'_>,
    data: &ProfileData,
    style: &ChartStyle,
    kind: PanelKind,
) -> PlotResult {
    let threads = data.thread_counts();
    let pts: Vec<(u32, f64)> =
        threads.iter().copied().zip(data.efficiency_percent()).collect();
    let x_max = *threads.last().unwrap() + 1;

    let (title, stroke, marker, measured, ideal_label, headroom) = match kind {
        PanelKind::Overview => (
            "Efficiency vs Number of Threads",
            LINE_STROKE_OVERVIEW,
            MARKER_OVERVIEW,
            "Measured Efficiency",
            "Ideal Efficiency (100%)",
            1.2,
        ),
        PanelKind::Individual => (
            "Efficiency Analysis",
            LINE_STROKE_INDIVIDUAL,
            MARKER_INDIVIDUAL,
            "Measured",
            "Ideal (100%)",
            1.3,
        ),
    };
    let y_max = data.max_efficiency_percent() * headroom;

    let mut chart = ChartBuilder::on(area)
        .caption(title, perf_style::bold(14).color(&style.text))
        .margin(pt(4))
        .x_label_area_size(pt(28))
        .y_label_area_size(pt(32))
        .build_cartesian_2d(1u32..x_max, 0.0..y_max)?;

    chart.plotting_area().fill(&style.panel_bg)?;
    chart
        .configure_mesh()
        .light_line_style(style.grid.mix(style.grid_alpha))
        .bold_line_style(style.grid.mix(style.grid_alpha))
        .x_labels(x_max as usize)
        .y_labels(10)
        .x_label_formatter(&|v| if threads.contains(v) { v.to_string() } else { String::new() })
        .x_desc("Number of Threads (p)")
        .y_desc("Efficiency (%)")
        .axis_desc_style(perf_style::bold(12).color(&style.text))
        .label_style((FONT, perf_style::scaled(9)).into_font().color(&style.text))
        .draw()?;

    chart.draw_series(AreaSeries::new(pts.clone(), 0.0, PURPLE.mix(0.3)))?;
    chart
        .draw_series(LineSeries::new(pts.clone(), PURPLE.stroke_width(stroke)))?
        .label(measured)
        .legend(move |(x, y)| legend_line(x, y, PURPLE));
    chart.draw_series(PointSeries::of_element(
        pts.clone(),
        marker,
        PURPLE.filled(),
        &|coord, size, st| EmptyElement::at(coord) + Rectangle::new([(-size, -size), (size, size)], st),
    ))?;

    // The y axis is capped below 100% for this dataset; the ideal line is
    // only drawn when it actually falls inside the range.
    if 100.0 <= y_max {
        chart
            .draw_series(DashedLineSeries::new(
                vec![(1u32, 100.0), (x_max, 100.0)],
                DASH_LEN,
                DASH_GAP,
                GREEN.stroke_width(REF_STROKE),
            ))?
            .label(ideal_label)
            .legend(move |(x, y)| legend_line(x, y, GREEN));
    }

    let value_font = value_label_font(style);
    let plot = chart.plotting_area();
    for &(t, e) in &pts {
        plot.draw(&Text::new(format!("{e:.2}%"), (t, e), value_font.clone()))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, perf_style::scaled(10)).into_font().color(&style.text))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_degradation_panel(area: &Panel<'_>, data: &ProfileData, style: &ChartStyle) -> PlotResult {
    let deg = data.degradation();
    let slots = deg.len() as u32;
    let y_max = deg.iter().copied().fold(1.0, f64::max) * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("How Many Times Slower Than Serial", perf_style::bold(14).color(&style.text))
        .margin(pt(4))
        .x_label_area_size(pt(28))
        .y_label_area_size(pt(32))
        .build_cartesian_2d((0u32..slots).into_segmented(), 0.0..y_max)?;

    chart.plotting_area().fill(&style.panel_bg)?;

    let labels: Vec<String> = data.points.iter().map(|m| m.threads.to_string()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(style.grid.mix(style.grid_alpha))
        .bold_line_style(style.grid.mix(style.grid_alpha))
        .x_labels(slots as usize + 2)
        .y_labels(10)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) if (*i as usize) < labels.len() => {
                labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .x_desc("Number of Threads (p)")
        .y_desc("Performance Degradation Factor")
        .axis_desc_style(perf_style::bold(12).color(&style.text))
        .label_style((FONT, perf_style::scaled(9)).into_font().color(&style.text))
        .draw()?;

    chart.draw_series(
        deg.iter().enumerate().map(|(i, &v)| bar(i as u32, v, ORANGE.mix(0.7).filled())),
    )?;
    // Solid outline over the translucent fill.
    chart.draw_series(deg.iter().enumerate().map(|(i, &v)| {
        bar(i as u32, v, ShapeStyle::from(&DARK_ORANGE).stroke_width(REF_STROKE / 2))
    }))?;
    chart
        .draw_series(DashedLineSeries::new(
            vec![(SegmentValue::Exact(0), 1.0), (SegmentValue::Exact(slots), 1.0)],
            DASH_LEN,
            DASH_GAP,
            RED.stroke_width(REF_STROKE),
        ))?
        .label("Serial Performance")
        .legend(move |(x, y)| legend_line(x, y, RED));

    let label_font = TextStyle::from(perf_style::bold(10))
        .color(&style.text)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let plot = chart.plotting_area();
    for (i, &v) in deg.iter().enumerate() {
        plot.draw(&Text::new(
            format!("{v:.1}x"),
            (SegmentValue::CenterOf(i as u32), v),
            label_font.clone(),
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, perf_style::scaled(10)).into_font().color(&style.text))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Point size to pixels, as the signed type the layout builders take.
fn pt(size: u32) -> i32 {
    perf_style::scaled(size) as i32
}

/// A vertical bar occupying one segment of a categorical axis, inset a little
/// on both sides so neighboring bars do not touch.
fn bar(slot: u32, value: f64, style: ShapeStyle) -> Rectangle<(SegmentValue<u32>, f64)> {
    let mut r = Rectangle::new(
        [(SegmentValue::Exact(slot), 0.0), (SegmentValue::Exact(slot + 1), value)],
        style,
    );
    r.set_margin(0, 0, BAR_GAP, BAR_GAP);
    r
}

fn value_label_font(style: &ChartStyle) -> TextStyle<'_> {
    TextStyle::from((FONT, perf_style::scaled(9)).into_font())
        .color(&style.text)
        .pos(Pos::new(HPos::Center, VPos::Bottom))
}

fn legend_box(x: i32, y: i32, color: RGBAColor) -> Rectangle<(i32, i32)> {
    Rectangle::new([(x, y - 6), (x + 20, y + 6)], color.filled())
}

fn legend_line(x: i32, y: i32, color: RGBColor) -> PathElement<(i32, i32)> {
    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(REF_STROKE / 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_data::DFS_TRAVERSAL;
    use crate::perf_style;
    use std::fs;

    #[test]
    fn missing_output_dir_fails_without_creating_files() {
        let dir = std::env::temp_dir().join(format!("perf-graphs-absent-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let data = &*DFS_TRAVERSAL;
        let style = perf_style::select(perf_style::PREFERRED);
        let paths = [
            dir.join("performance_graphs.png"),
            dir.join("performance_graphs_individual.png"),
            dir.join("performance_graphs_comparison.png"),
        ];

        assert!(write_overview(data, style, &paths[0]).is_err());
        assert!(write_individual(data, style, &paths[1]).is_err());
        assert!(write_comparison(data, style, &paths[2]).is_err());

        for p in &paths {
            assert!(!p.exists());
        }
        assert!(!dir.exists());
    }
}
