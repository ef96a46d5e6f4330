use crate::dataset::Series;
use crate::error::{PlotError, Result};
use crate::style::{ChartStyle, LineStyle, Marker, SeriesStyle};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Image formats that can be saved, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<ImageFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("svg") => Ok(ImageFormat::Svg),
            _ => Err(PlotError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// One y series with the style it is drawn with.
#[derive(Debug, Clone)]
pub struct Curve {
    pub name: String,
    pub values: Vec<f64>,
    pub style: SeriesStyle,
}

/// A chart ready to be saved: the x series and the curves plotted against it.
#[derive(Debug, Clone)]
pub struct Plot {
    pub x_name: String,
    pub x: Vec<f64>,
    pub curves: Vec<Curve>,
    pub style: ChartStyle,
}

/// Plots y against x, the single-curve chart of most scripts.
pub fn render(
    x: &Series<f64>,
    y: &Series<f64>,
    series_style: SeriesStyle,
    chart_style: ChartStyle,
) -> Result<Plot> {
    let mut plot = Plot::new(x, chart_style);
    plot.add(y, series_style)?;
    Ok(plot)
}

impl Plot {
    pub fn new(x: &Series<f64>, style: ChartStyle) -> Plot {
        Plot {
            x_name: x.name.clone(),
            x: x.values.clone(),
            curves: Vec::new(),
            style,
        }
    }

    /// adds a curve sharing the x series; lengths must match and be non-zero
    pub fn add(&mut self, y: &Series<f64>, style: SeriesStyle) -> Result<()> {
        if y.values.len() != self.x.len() {
            return Err(PlotError::LengthMismatch {
                x: self.x_name.clone(),
                x_len: self.x.len(),
                y: y.name.clone(),
                y_len: y.values.len(),
            });
        }
        if self.x.is_empty() {
            return Err(PlotError::EmptySeries(self.x_name.clone()));
        }
        self.curves.push(Curve {
            name: y.name.clone(),
            values: y.values.clone(),
            style,
        });
        Ok(())
    }

    /// writes the chart to fout as png or svg, overwriting any existing file
    pub fn save<P: AsRef<Path>>(&self, fout: P) -> Result<()> {
        let path = fout.as_ref();
        if self.curves.is_empty() {
            return Err(PlotError::NoCurves(self.x_name.clone()));
        }
        let format = ImageFormat::from_path(path)?;
        // the bitmap backend writes its file when dropped, check the ranges before creating it
        let ranges = self.axis_ranges()?;
        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, self.style.size).into_drawing_area();
                self.draw(&root, ranges)?;
                root.present().map_err(drawing_error)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, self.style.size).into_drawing_area();
                self.draw(&root, ranges)?;
                root.present().map_err(drawing_error)?;
            }
        }
        Ok(())
    }

    /// x and y axis ranges, padded around the data
    pub fn axis_ranges(&self) -> Result<((f64, f64), (f64, f64))> {
        let x = padded_range(&self.x, 20.)?;
        let ys: Vec<f64> = self
            .curves
            .iter()
            .flat_map(|c| c.values.iter().copied())
            .collect();
        let y = padded_range(&ys, 10.)?;
        debug!("axis ranges x [{}, {}], y [{}, {}]", x.0, x.1, y.0, y.1);
        Ok((x, y))
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        ((xmin, xmax), (ymin, ymax)): ((f64, f64), (f64, f64)),
    ) -> Result<()> {
        root.fill(&WHITE).map_err(drawing_error)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.style.title, ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)
            .map_err(drawing_error)?;

        let mut mesh = chart.configure_mesh();
        if !self.style.grid {
            mesh.disable_mesh();
        }
        mesh.light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 20))
            .x_desc(self.style.x_label.as_str())
            .y_desc(self.style.y_label.as_str())
            .draw()
            .map_err(drawing_error)?;

        for curve in self.curves.iter() {
            let color = curve.style.color;
            let marker = curve.style.marker;
            let line = curve.style.line;
            let points: Vec<(f64, f64)> = self
                .x
                .iter()
                .copied()
                .zip(curve.values.iter().copied())
                .collect();

            match line {
                LineStyle::None => {}
                LineStyle::Solid => {
                    chart
                        .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                        .map_err(drawing_error)?;
                }
                LineStyle::Dashed => {
                    chart
                        .draw_series(DashedLineSeries::new(
                            points.clone(),
                            10,
                            6,
                            color.stroke_width(2),
                        ))
                        .map_err(drawing_error)?;
                }
            }

            match marker {
                Marker::None => {}
                Marker::Point => {
                    chart
                        .draw_series(points.iter().map(|&p| Circle::new(p, 2, color.filled())))
                        .map_err(drawing_error)?;
                }
                Marker::Circle => {
                    chart
                        .draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))
                        .map_err(drawing_error)?;
                }
                Marker::Triangle => {
                    chart
                        .draw_series(
                            points
                                .iter()
                                .map(|&p| TriangleMarker::new(p, 5, color.filled())),
                        )
                        .map_err(drawing_error)?;
                }
                Marker::Cross => {
                    chart
                        .draw_series(
                            points
                                .iter()
                                .map(|&p| Cross::new(p, 4, color.stroke_width(2))),
                        )
                        .map_err(drawing_error)?;
                }
            }

            // legend entry only, the data is already drawn
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
                .map_err(drawing_error)?
                .label(curve.style.label.as_str())
                .legend(move |(x, y)| {
                    let line_style = match line {
                        LineStyle::None => TRANSPARENT.stroke_width(1),
                        _ => color.stroke_width(2),
                    };
                    let marker_style = match marker {
                        Marker::None => TRANSPARENT.filled(),
                        _ => color.filled(),
                    };
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(-12, 0), (12, 0)], line_style)
                        + Circle::new((0, 0), 4, marker_style)
                });
        }

        chart
            .configure_series_labels()
            .position(self.style.legend.to_series_label_position())
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 20))
            .draw()
            .map_err(drawing_error)?;
        Ok(())
    }
}

fn drawing_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Drawing(e.to_string())
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// min and max of the finite values, widened by span/divisor on each side.
/// Fails when the range or its width does not fit in an f64.
pub fn padded_range(values: &[f64], divisor: f64) -> Result<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let (min, max) = match min_and_max(&finite[..]) {
        Some(mm) => mm,
        None => return Ok((0., 1.)),
    };
    // divide first, max - min overflows for values near f64::MAX
    let margin = max / divisor - min / divisor;
    let margin = if margin > 0. {
        margin
    } else if min != 0. {
        min.abs() / divisor
    } else {
        1.
    };
    let (lo, hi) = (min - margin, max + margin);
    if lo.is_finite() && hi.is_finite() && (hi - lo).is_finite() {
        Ok((lo, hi))
    } else {
        Err(PlotError::AxisRange { min, max })
    }
}
