//! The fixed recipes of the plotting scripts: which csv to read, how its
//! series are laid out, the per-script transforms, and how the chart looks.

use crate::dataset::{Dataset, RawDataset, Schema};
use crate::error::Result;
use crate::plot::Plot;
use crate::style::{ChartStyle, SeriesStyle};
use log::{debug, info};
use std::path::Path;

/// Columns of the congestion control logs: BSM time, CBR, WSA received time, ITT
pub const V2X_COLUMNS: [&str; 4] = ["bsm_time", "cbr", "wsa_received_time", "itt"];

/// Series of the practice books: time, modified CBR, unmodified CBR
pub const BOOK_SERIES: [&str; 3] = ["time", "cbr", "test"];

#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: &'static str,
    pub about: &'static str,
    pub input: &'static str,
    pub output: &'static str,
    pub schema: Schema,
    /// the first row is a header and is dropped before parsing
    pub drop_header: bool,
    /// constants added to named series after parsing
    pub offsets: Vec<(&'static str, f64)>,
    pub x: &'static str,
    pub curves: Vec<(&'static str, SeriesStyle)>,
    pub chart: ChartStyle,
}

impl Recipe {
    /// Load, convert and transform the csv at fin.
    pub fn load<P: AsRef<Path>>(&self, fin: P) -> Result<Dataset> {
        let mut raw = RawDataset::from_csv(fin, &self.schema)?;
        debug!("{}: read {} rows", self.name, raw.len());
        if self.drop_header {
            raw.drop_header();
            debug!("{}: dropped header row", self.name);
        }
        let mut dataset = raw.to_numeric()?;
        for (name, delta) in self.offsets.iter() {
            dataset.offset(name, *delta)?;
            debug!("{}: offset {} by {}", self.name, name, delta);
        }
        Ok(dataset)
    }

    pub fn render(&self, dataset: &Dataset) -> Result<Plot> {
        let mut plot = Plot::new(dataset.get(self.x)?, self.chart.clone());
        for (name, style) in self.curves.iter() {
            plot.add(dataset.get(name)?, style.clone())?;
        }
        Ok(plot)
    }

    /// Runs the whole script; nothing is written unless every step before saving succeeds.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, fin: P, fout: Q) -> Result<Dataset> {
        let dataset = self.load(fin)?;
        let plot = self.render(&dataset)?;
        plot.save(&fout)?;
        info!("{}: wrote {}", self.name, fout.as_ref().display());
        Ok(dataset)
    }
}

/// ITT against CBR for 200 vehicles, 0.08 target CBR.
pub fn v2x_200_cbr_itt() -> Result<Recipe> {
    Ok(Recipe {
        name: "v2x_200_cbr_itt",
        about: "cli app to plot ITT against CBR of the V2X_200_0.08 run",
        input: "V2X_200_0.08.csv",
        output: "V2X_200_0.08_CBR_ITT.png",
        schema: Schema::columns(&V2X_COLUMNS),
        drop_header: false,
        offsets: vec![("wsa_received_time", -1.)],
        x: "cbr",
        curves: vec![("itt", SeriesStyle::parse("purple", "o", "", "ITT")?)],
        chart: ChartStyle::new("ITT stabilizing", "CBR", "ITT"),
    })
}

/// CBR against ITT for 300 vehicles, 0.145 target CBR.
pub fn v2x_300_itt_cbr() -> Result<Recipe> {
    Ok(Recipe {
        name: "v2x_300_itt_cbr",
        about: "cli app to plot CBR against ITT of the V2X_300_0.145 run",
        input: "V2X_300_0.145.csv",
        output: "V2X_300_0.145_ITT_CBR.png",
        schema: Schema::columns(&V2X_COLUMNS),
        drop_header: false,
        offsets: vec![("wsa_received_time", -1.)],
        x: "itt",
        curves: vec![("cbr", SeriesStyle::parse("green", "o", "", "CBR")?)],
        chart: ChartStyle::new("CBR stabilizing", "ITT", "CBR"),
    })
}

fn book_curves() -> Result<Vec<(&'static str, SeriesStyle)>> {
    Ok(vec![
        ("cbr", SeriesStyle::parse("magenta", "o", "dashed", "modfied CBR")?),
        ("test", SeriesStyle::parse("cyan", "o", "solid", "unmodfied CBR")?),
    ])
}

/// Practice book stored by columns, with a header row.
pub fn book_column() -> Result<Recipe> {
    Ok(Recipe {
        name: "csv_column_graph",
        about: "cli app to plot the practice CBR book stored by columns",
        input: "Book_column.csv",
        output: "CSV_COLUMN.png",
        schema: Schema::columns(&BOOK_SERIES),
        drop_header: true,
        offsets: Vec::new(),
        x: "time",
        curves: book_curves()?,
        chart: ChartStyle::new("CBR stabilizing", "TIME", "CBR"),
    })
}

/// Practice book stored by rows, each row starting with its label.
pub fn book_row() -> Result<Recipe> {
    Ok(Recipe {
        name: "csv_row_graph",
        about: "cli app to plot the practice CBR book stored by rows",
        input: "Book_row.csv",
        output: "CSV_ROW.png",
        schema: Schema::rows(&BOOK_SERIES),
        drop_header: false,
        offsets: Vec::new(),
        x: "time",
        curves: book_curves()?,
        chart: ChartStyle::new("CBR stabilizing", "TIME", "CBR"),
    })
}
