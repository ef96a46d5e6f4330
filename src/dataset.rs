use crate::error::{PlotError, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

const BOM: char = '\u{feff}';

/// How the series are laid out in the csv file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// one row per line, field i of every line belongs to series i
    Columns,
    /// one series per line, the first field of the line is a label and is dropped
    Rows,
}

/// Names and positions of the series expected in a csv file.
#[derive(Debug, Clone)]
pub struct Schema {
    pub names: Vec<String>,
    pub layout: Layout,
}

impl Schema {
    pub fn columns(names: &[&str]) -> Schema {
        Schema {
            names: names.iter().map(|n| n.to_string()).collect(),
            layout: Layout::Columns,
        }
    }

    pub fn rows(names: &[&str]) -> Schema {
        Schema {
            names: names.iter().map(|n| n.to_string()).collect(),
            layout: Layout::Rows,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One named series, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
    pub name: String,
    pub values: Vec<T>,
}

impl<T> Series<T> {
    fn new(name: &str, capacity: usize) -> Series<T> {
        Series {
            name: name.to_string(),
            values: Vec::with_capacity(capacity),
        }
    }
}

/// The series of a csv file as read, fields still as text.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub series: Vec<Series<String>>,
}

impl RawDataset {
    /// Reads the csv at the given path according to the schema.
    /// Fails on the first malformed line, no partial dataset is returned.
    pub fn from_csv<P: AsRef<Path>>(fin: P, schema: &Schema) -> Result<RawDataset> {
        let path = fin.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PlotError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => PlotError::Io(e),
        })?;
        RawDataset::from_reader(file, schema)
    }

    /// Same as `from_csv`, reading from any source.
    /// A leading byte-order mark is skipped and fields are trimmed.
    pub fn from_reader<R: Read>(mut rdr: R, schema: &Schema) -> Result<RawDataset> {
        let mut text = String::new();
        rdr.read_to_string(&mut text)?;
        let text = text.strip_prefix(BOM).unwrap_or(&text);

        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All);

        let mut series: Vec<Series<String>>;
        match schema.layout {
            Layout::Columns => {
                // lines are split on the comma only, quotes are kept as text
                let mut csv_reader = builder.quoting(false).from_reader(text.as_bytes());
                let n_lines = text.lines().count();
                series = schema
                    .names
                    .iter()
                    .map(|n| Series::new(n, n_lines))
                    .collect();
                let mut previous_line = 0;
                for record in csv_reader.records() {
                    let record = record?;
                    let line = record.position().map(|p| p.line()).unwrap_or_default();
                    if line > previous_line + 1 {
                        return Err(blank_line(previous_line + 1, schema));
                    }
                    if record.len() != schema.len() {
                        return Err(PlotError::FieldCount {
                            line,
                            expected: schema.len(),
                            found: record.len(),
                        });
                    }
                    for (s, field) in series.iter_mut().zip(record.iter()) {
                        s.values.push(field.to_string());
                    }
                    previous_line = line;
                }
                // blank lines after the last row
                if (n_lines as u64) > previous_line {
                    return Err(blank_line(previous_line + 1, schema));
                }
            }
            Layout::Rows => {
                let mut csv_reader = builder.from_reader(text.as_bytes());
                let records = csv_reader
                    .records()
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                if records.len() < schema.len() {
                    return Err(PlotError::RowCount {
                        expected: schema.len(),
                        found: records.len(),
                    });
                }
                // rows past the schema are ignored
                series = schema
                    .names
                    .iter()
                    .zip(records.iter())
                    .map(|(n, record)| Series {
                        name: n.to_string(),
                        values: record.iter().skip(1).map(|f| f.to_string()).collect(),
                    })
                    .collect();
            }
        }
        Ok(RawDataset { series })
    }

    /// number of entries of the longest series
    pub fn len(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// drops the first entry of every series, i.e. the header row
    pub fn drop_header(&mut self) {
        for s in self.series.iter_mut() {
            if !s.values.is_empty() {
                s.values.remove(0);
            }
        }
    }

    /// parses every entry to f64, failing on the first non-numeric one
    pub fn to_numeric(self) -> Result<Dataset> {
        let mut series = Vec::with_capacity(self.series.len());
        for raw in self.series {
            let mut s: Series<f64> = Series::new(&raw.name, raw.values.len());
            for (index, value) in raw.values.into_iter().enumerate() {
                match value.parse() {
                    Ok(v) => s.values.push(v),
                    Err(_) => {
                        return Err(PlotError::NotNumeric {
                            series: raw.name,
                            index,
                            value,
                        })
                    }
                }
            }
            series.push(s);
        }
        Ok(Dataset { series })
    }
}

fn blank_line(line: u64, schema: &Schema) -> PlotError {
    PlotError::FieldCount {
        line,
        expected: schema.len(),
        found: 1,
    }
}

/// The numeric series of a csv file.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub series: Vec<Series<f64>>,
}

impl Dataset {
    pub fn get(&self, name: &str) -> Result<&Series<f64>> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| PlotError::UnknownSeries(name.to_string()))
    }

    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.get(name).map(|s| &s.values[..])
    }

    /// adds delta to every value of the named series, in-place
    pub fn offset(&mut self, name: &str, delta: f64) -> Result<()> {
        let s = self
            .series
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| PlotError::UnknownSeries(name.to_string()))?;
        for v in s.values.iter_mut() {
            *v += delta;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v2x_schema() -> Schema {
        Schema::columns(&["bsm_time", "cbr", "wsa_received_time", "itt"])
    }

    #[test]
    fn reads_columns_in_file_order() {
        let input = "1.0,0.2,2.0,0.05\n2.0,0.3,3.0,0.06\n3.0,0.4,4.0,0.07\n";
        let raw = RawDataset::from_reader(input.as_bytes(), &v2x_schema()).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw.series[0].values, vec!["1.0", "2.0", "3.0"]);
        assert_eq!(raw.series[3].values, vec!["0.05", "0.06", "0.07"]);
    }

    #[test]
    fn strips_byte_order_mark() {
        let input = "\u{feff}1.0,0.2,2.0,0.05\r\n2.0,0.3,3.0,0.06\r\n";
        let ds = RawDataset::from_reader(input.as_bytes(), &v2x_schema())
            .unwrap()
            .to_numeric()
            .unwrap();
        assert_eq!(ds.values("bsm_time").unwrap(), &[1.0, 2.0]);
        assert_eq!(ds.values("itt").unwrap(), &[0.05, 0.06]);
    }

    #[test]
    fn short_line_fails_the_whole_load() {
        let input = "1.0,0.2,2.0,0.05\n2.0,0.3,3.0\n";
        match RawDataset::from_reader(input.as_bytes(), &v2x_schema()) {
            Err(PlotError::FieldCount {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("expected a field count error, got {:?}", other),
        }
    }

    #[test]
    fn long_line_fails_the_whole_load() {
        let input = "1.0,0.2,2.0,0.05,9\n";
        assert!(matches!(
            RawDataset::from_reader(input.as_bytes(), &v2x_schema()),
            Err(PlotError::FieldCount { found: 5, .. })
        ));
    }

    #[test]
    fn non_numeric_field_fails_conversion() {
        let input = "1.0,0.2,2.0,0.05\n2.0,busy,3.0,0.06\n";
        let raw = RawDataset::from_reader(input.as_bytes(), &v2x_schema()).unwrap();
        match raw.to_numeric() {
            Err(PlotError::NotNumeric {
                series,
                index,
                value,
            }) => {
                assert_eq!(series, "cbr");
                assert_eq!(index, 1);
                assert_eq!(value, "busy");
            }
            other => panic!("expected a conversion error, got {:?}", other),
        }
    }

    #[test]
    fn header_row_is_never_parsed() {
        let input = "TIME,CBR,TEST\n0,0.1,0.2\n1,0.3,0.4\n";
        let mut raw =
            RawDataset::from_reader(input.as_bytes(), &Schema::columns(&["time", "cbr", "test"]))
                .unwrap();
        assert!(raw.clone().to_numeric().is_err());
        raw.drop_header();
        let ds = raw.to_numeric().unwrap();
        assert_eq!(ds.values("time").unwrap(), &[0.0, 1.0]);
        assert_eq!(ds.values("test").unwrap(), &[0.2, 0.4]);
    }

    #[test]
    fn offset_subtracts_exactly() {
        let input = "1.0,0.2,2.0,0.05\n2.0,0.3,3.7,0.06\n";
        let mut ds = RawDataset::from_reader(input.as_bytes(), &v2x_schema())
            .unwrap()
            .to_numeric()
            .unwrap();
        ds.offset("wsa_received_time", -1.0).unwrap();
        assert_eq!(ds.values("wsa_received_time").unwrap(), &[2.0 - 1.0, 3.7 - 1.0]);
        assert_eq!(ds.values("bsm_time").unwrap(), &[1.0, 2.0]);
        assert!(matches!(
            ds.offset("nope", 1.0),
            Err(PlotError::UnknownSeries(_))
        ));
    }

    #[test]
    fn rows_layout_drops_the_label_cell() {
        let input = "TIME,0,1,2\nCBR,0.1,0.2,0.3\nTEST,0.5,0.6,0.7\n";
        let ds = RawDataset::from_reader(input.as_bytes(), &Schema::rows(&["time", "cbr", "test"]))
            .unwrap()
            .to_numeric()
            .unwrap();
        assert_eq!(ds.values("time").unwrap(), &[0.0, 1.0, 2.0]);
        assert_eq!(ds.values("cbr").unwrap(), &[0.1, 0.2, 0.3]);
        assert_eq!(ds.values("test").unwrap(), &[0.5, 0.6, 0.7]);
    }

    #[test]
    fn rows_layout_checks_the_row_count() {
        let input = "TIME,0,1,2\nCBR,0.1,0.2,0.3\n";
        assert!(matches!(
            RawDataset::from_reader(input.as_bytes(), &Schema::rows(&["time", "cbr", "test"])),
            Err(PlotError::RowCount {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn rows_layout_ignores_rows_past_the_schema() {
        let input = "TIME,0,1,2\nCBR,0.1,0.2,0.3\nTEST,0.5,0.6,0.7\nNOTE,1,2,3\n";
        let raw =
            RawDataset::from_reader(input.as_bytes(), &Schema::rows(&["time", "cbr", "test"]))
                .unwrap();
        assert_eq!(raw.series.len(), 3);
        assert_eq!(raw.series[2].values, vec!["0.5", "0.6", "0.7"]);
    }

    #[test]
    fn blank_line_between_rows_fails_the_load() {
        let input = "1.0,0.2,2.0,0.05\n\n2.0,0.3,3.0,0.06\n";
        assert!(matches!(
            RawDataset::from_reader(input.as_bytes(), &v2x_schema()),
            Err(PlotError::FieldCount {
                line: 2,
                expected: 4,
                found: 1
            })
        ));
    }

    #[test]
    fn blank_line_at_the_end_fails_the_load() {
        let input = "1.0,0.2,2.0,0.05\n2.0,0.3,3.0,0.06\n\n";
        assert!(matches!(
            RawDataset::from_reader(input.as_bytes(), &v2x_schema()),
            Err(PlotError::FieldCount { line: 3, found: 1, .. })
        ));
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let input = "1.0,0.2,2.0,0.05\n2.0,0.3,3.0,0.06";
        let raw = RawDataset::from_reader(input.as_bytes(), &v2x_schema()).unwrap();
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn quotes_are_kept_in_column_fields() {
        let input = "1.0,\"0.2\",2.0,0.05\n2.0,0.3,3.0,0.06\n";
        let raw = RawDataset::from_reader(input.as_bytes(), &v2x_schema()).unwrap();
        assert_eq!(raw.series[1].values[0], "\"0.2\"");
        assert!(matches!(
            raw.to_numeric(),
            Err(PlotError::NotNumeric { index: 0, .. })
        ));
    }

    #[test]
    fn quoted_fields_are_unquoted_in_rows_layout() {
        let input = "TIME,0,1\n\"CBR\",\"0.1\",0.2\nTEST,0.5,0.6\n";
        let ds = RawDataset::from_reader(input.as_bytes(), &Schema::rows(&["time", "cbr", "test"]))
            .unwrap()
            .to_numeric()
            .unwrap();
        assert_eq!(ds.values("cbr").unwrap(), &[0.1, 0.2]);
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let err = RawDataset::from_csv("does/not/exist.csv", &v2x_schema()).unwrap_err();
        assert!(matches!(err, PlotError::FileNotFound { .. }));
    }
}
