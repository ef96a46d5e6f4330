use crate::error::PlotError;
use plotters::prelude::*;
use std::str::FromStr;

/// Named colors, matplotlib's basic palette.
pub fn named_color(name: &str) -> Result<RGBColor, PlotError> {
    let c = match name.trim().to_lowercase().as_str() {
        "black" | "k" => RGBColor(0, 0, 0),
        "white" | "w" => RGBColor(255, 255, 255),
        "red" | "r" => RGBColor(255, 0, 0),
        "green" | "g" => RGBColor(0, 128, 0),
        "blue" | "b" => RGBColor(0, 0, 255),
        "cyan" | "c" => RGBColor(0, 255, 255),
        "magenta" | "m" => RGBColor(255, 0, 255),
        "yellow" | "y" => RGBColor(255, 255, 0),
        "purple" => RGBColor(128, 0, 128),
        "orange" => RGBColor(255, 165, 0),
        "brown" => RGBColor(165, 42, 42),
        "pink" => RGBColor(255, 192, 203),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "olive" => RGBColor(128, 128, 0),
        "navy" => RGBColor(0, 0, 128),
        "teal" => RGBColor(0, 128, 128),
        _ => return Err(PlotError::UnknownColor(name.to_string())),
    };
    Ok(c)
}

/// Glyph drawn at every data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Point,
    Circle,
    Triangle,
    Cross,
}

impl FromStr for Marker {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Marker::None),
            "." => Ok(Marker::Point),
            "o" => Ok(Marker::Circle),
            "^" => Ok(Marker::Triangle),
            "x" | "+" => Ok(Marker::Cross),
            other => Err(PlotError::UnknownMarker(other.to_string())),
        }
    }
}

/// Line joining consecutive data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    None,
    Solid,
    Dashed,
}

impl FromStr for LineStyle {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(LineStyle::None),
            "solid" | "-" => Ok(LineStyle::Solid),
            "dashed" | "--" => Ok(LineStyle::Dashed),
            other => Err(PlotError::UnknownLineStyle(other.to_string())),
        }
    }
}

/// Corner (or edge) of the chart where the legend goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperCenter,
    UpperRight,
    CenterLeft,
    Center,
    CenterRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl LegendPosition {
    pub fn to_series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperCenter => SeriesLabelPosition::UpperMiddle,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::CenterLeft => SeriesLabelPosition::MiddleLeft,
            LegendPosition::Center => SeriesLabelPosition::MiddleMiddle,
            LegendPosition::CenterRight => SeriesLabelPosition::MiddleRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerCenter => SeriesLabelPosition::LowerMiddle,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

impl FromStr for LegendPosition {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper left" => Ok(LegendPosition::UpperLeft),
            "upper center" => Ok(LegendPosition::UpperCenter),
            "upper right" => Ok(LegendPosition::UpperRight),
            "center left" => Ok(LegendPosition::CenterLeft),
            "center" => Ok(LegendPosition::Center),
            "center right" | "right" => Ok(LegendPosition::CenterRight),
            "lower left" => Ok(LegendPosition::LowerLeft),
            "lower center" => Ok(LegendPosition::LowerCenter),
            "lower right" => Ok(LegendPosition::LowerRight),
            _ => Err(PlotError::UnknownLegendPosition(s.to_string())),
        }
    }
}

/// How a single y series is drawn.
#[derive(Debug, Clone)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub marker: Marker,
    pub line: LineStyle,
    pub label: String,
}

impl SeriesStyle {
    /// Builds a style from matplotlib-like strings, e.g. ("purple", "o", "", "ITT")
    pub fn parse(
        color: &str,
        marker: &str,
        line: &str,
        label: &str,
    ) -> Result<SeriesStyle, PlotError> {
        Ok(SeriesStyle {
            color: named_color(color)?,
            marker: marker.parse()?,
            line: line.parse()?,
            label: label.to_string(),
        })
    }
}

/// Decorations of the whole chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendPosition,
    pub grid: bool,
    pub size: (u32, u32),
}

impl ChartStyle {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> ChartStyle {
        ChartStyle {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            legend: LegendPosition::UpperLeft,
            grid: true,
            size: (1280, 960),
        }
    }
}
