use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{Float32Type, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::MixError;
use super::model::Spectrum;

/// Scale factor taking nanometre wavelengths to microns.
pub const NANOMETERS_TO_MICRONS: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Loader options
// ---------------------------------------------------------------------------

/// Per-file loading options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderConfig {
    /// Multiplies every parsed wavelength (unit normalisation).
    pub wavelength_scale: f64,
    /// Which spectrum to take from multi-spectrum JSON / Parquet files.
    pub row: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            wavelength_scale: 1.0,
            row: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one endmember spectrum from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – `wavelength,reflectance[,error]` rows, optional header
/// * `.json`    – `{ "x": [...], "y": [...] }` or an array of such records
/// * `.parquet` – Parquet file with `x` and `y` list columns, one spectrum per row
/// * anything else – whitespace-delimited `wavelength reflectance [error]` text
pub fn load_file(path: &Path, config: &LoaderConfig) -> Result<Spectrum> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let name = path.display().to_string();
    let (mut wavelength, reflectance) = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path, config.row)?,
        "json" => load_json(path, config.row)?,
        "csv" => load_csv(path)?,
        _ => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading spectrum file {name}"))?;
            parse_columns(&text, &name)?
        }
    };

    if config.wavelength_scale != 1.0 {
        for w in &mut wavelength {
            *w *= config.wavelength_scale;
        }
    }

    let spectrum = Spectrum::new(name, wavelength, reflectance)?;
    log::debug!(
        "Loaded {} points from {} (range {:?})",
        spectrum.len(),
        spectrum.name,
        spectrum.range()
    );
    Ok(spectrum)
}

// ---------------------------------------------------------------------------
// Whitespace text loader
// ---------------------------------------------------------------------------

/// Parse `wavelength reflectance [error]` records, one per line.
///
/// Blank lines and lines starting with `#` are skipped. Columns past the
/// second are ignored.
pub fn parse_columns(text: &str, name: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut wavelength = Vec::new();
    let mut reflectance = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(w), Some(r)) = (fields.next(), fields.next()) else {
            return Err(MixError::input_shape(
                name,
                format!("line {}: expected at least 2 columns, got '{line}'", line_no + 1),
            )
            .into());
        };
        wavelength.push(parse_field(w, name, line_no + 1)?);
        reflectance.push(parse_field(r, name, line_no + 1)?);
    }

    Ok((wavelength, reflectance))
}

fn parse_field(tok: &str, name: &str, line: usize) -> Result<f64> {
    tok.parse::<f64>().map_err(|_| {
        MixError::input_shape(name, format!("line {line}: '{tok}' is not a number")).into()
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: `wavelength,reflectance[,error]` per row.
/// A first row whose wavelength field is not numeric is treated as a header.
fn load_csv(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let name = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .context("opening CSV")?;

    let mut wavelength = Vec::new();
    let mut reflectance = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() < 2 {
            return Err(MixError::input_shape(
                &name,
                format!("CSV row {row_no}: expected at least 2 columns, got {}", record.len()),
            )
            .into());
        }
        let w = &record[0];
        if row_no == 0 && w.parse::<f64>().is_err() {
            log::debug!("{name}: skipping CSV header {record:?}");
            continue;
        }
        wavelength.push(parse_field(w, &name, row_no + 1)?);
        reflectance.push(parse_field(&record[1], &name, row_no + 1)?);
    }

    Ok((wavelength, reflectance))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema, either a single record or records-oriented
/// (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "x": [0.35, 0.36, ...], "y": [0.12, 0.14, ...], "label": "land" },
///   ...
/// ]
/// ```
fn load_json(path: &Path, row: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rec = match &root {
        JsonValue::Array(records) => records
            .get(row)
            .with_context(|| format!("JSON has {} records, row {row} requested", records.len()))?,
        JsonValue::Object(_) => &root,
        _ => bail!("Expected a JSON object or array of objects"),
    };
    let obj = rec
        .as_object()
        .with_context(|| format!("Row {row} is not a JSON object"))?;

    let x = json_array_to_f64(obj.get("x"), row, "x")?;
    let y = json_array_to_f64(obj.get("y"), row, "y")?;
    Ok((x, y))
}

fn json_array_to_f64(val: Option<&JsonValue>, row: usize, col: &str) -> Result<Vec<f64>> {
    let arr = val
        .and_then(|v| v.as_array())
        .with_context(|| format!("Row {row}: missing or invalid '{col}' array"))?;

    arr.iter()
        .enumerate()
        .map(|(j, v)| {
            v.as_f64()
                .with_context(|| format!("Row {row}, {col}[{j}]: not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load one spectrum from a Parquet file with `x` and `y` list columns
/// (List<Float64> / LargeList<Float64>, Float32 accepted), as written by
/// Pandas or Polars. `row` counts across record batches.
fn load_parquet(path: &Path, row: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut seen = 0usize;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let n_rows = batch.num_rows();
        if row >= seen + n_rows {
            seen += n_rows;
            continue;
        }

        let schema = batch.schema();
        let x_idx = schema
            .index_of("x")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'x' column"))?;
        let y_idx = schema
            .index_of("y")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'y' column"))?;

        let local = row - seen;
        let x = list_cell_values(batch.column(x_idx).as_ref(), local)
            .with_context(|| format!("Row {row}: failed to read 'x'"))?;
        let y = list_cell_values(batch.column(y_idx).as_ref(), local)
            .with_context(|| format!("Row {row}: failed to read 'y'"))?;
        return Ok((x, y));
    }

    bail!("Parquet file has {seen} rows, row {row} requested")
}

/// Values of one list cell as `f64`; null elements become NaN.
fn list_cell_values(column: &dyn Array, row: usize) -> Result<Vec<f64>> {
    if column.is_null(row) {
        bail!("list cell is null");
    }
    let cell: ArrayRef = if let Some(list) = column.as_list_opt::<i32>() {
        list.value(row)
    } else if let Some(list) = column.as_list_opt::<i64>() {
        list.value(row)
    } else {
        bail!("column type {:?} is not a list", column.data_type());
    };

    if let Some(values) = cell.as_primitive_opt::<Float64Type>() {
        return Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect());
    }
    match cell.as_primitive_opt::<Float32Type>() {
        Some(values) => Ok(values.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect()),
        None => bail!("list items are {:?}, not floating point", cell.data_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float32Builder, Float64Builder, LargeListBuilder, ListBuilder};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_three_columns() {
        let text = "0.35 0.10 0.01\n0.40\t0.12   0.01\n\n# comment\n0.45 0.15 0.02\n";
        let (w, r) = parse_columns(text, "land").unwrap();
        assert_eq!(w, vec![0.35, 0.40, 0.45]);
        assert_eq!(r, vec![0.10, 0.12, 0.15]);
    }

    #[test]
    fn test_parse_missing_column() {
        let err = parse_columns("0.35 0.10\n0.40\n", "land").unwrap_err();
        let shape = err.downcast_ref::<MixError>().unwrap();
        assert!(shape.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_bad_number() {
        let err = parse_columns("0.35 abc\n", "land").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MixError>(),
            Some(MixError::InputShape { .. })
        ));
    }

    #[test]
    fn test_load_text_with_scale() {
        let file = write_temp(".txt", "350 0.2 0.01\n400 0.3 0.01\n450 0.4 0.01\n");
        let config = LoaderConfig {
            wavelength_scale: NANOMETERS_TO_MICRONS,
            ..Default::default()
        };
        let sp = load_file(file.path(), &config).unwrap();
        assert_eq!(sp.len(), 3);
        assert!((sp.wavelength[0] - 0.35).abs() < 1e-12);
        assert!((sp.wavelength[2] - 0.45).abs() < 1e-12);
        assert_eq!(sp.reflectance, vec![0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_load_text_too_short() {
        let file = write_temp(".txt", "0.5 0.2\n");
        let err = load_file(file.path(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MixError>(),
            Some(MixError::InputShape { .. })
        ));
    }

    #[test]
    fn test_load_csv_with_header() {
        let file = write_temp(".csv", "wavelength,reflectance,error\n0.5,0.2,0.01\n0.6,0.25,0.01\n");
        let sp = load_file(file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(sp.wavelength, vec![0.5, 0.6]);
        assert_eq!(sp.reflectance, vec![0.2, 0.25]);
    }

    #[test]
    fn test_load_csv_without_header() {
        let file = write_temp(".csv", "0.5, 0.2\n0.6, 0.25\n0.7, 0.3\n");
        let sp = load_file(file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(sp.len(), 3);
    }

    #[test]
    fn test_load_json_records() {
        let file = write_temp(
            ".json",
            r#"[{"x": [1.0, 2.0], "y": [0.1, 0.2]}, {"x": [3.0, 4.0, 5.0], "y": [0.3, 0.4, 0.5], "label": "b"}]"#,
        );
        let config = LoaderConfig {
            row: 1,
            ..Default::default()
        };
        let sp = load_file(file.path(), &config).unwrap();
        assert_eq!(sp.wavelength, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_load_json_row_out_of_range() {
        let file = write_temp(".json", r#"{"x": [1.0, 2.0], "y": [0.1, 0.2]}"#);
        assert!(load_file(file.path(), &LoaderConfig::default()).is_ok());

        let arr = write_temp(".json", r#"[{"x": [1.0, 2.0], "y": [0.1, 0.2]}]"#);
        let config = LoaderConfig {
            row: 3,
            ..Default::default()
        };
        assert!(load_file(arr.path(), &config).is_err());
    }

    #[test]
    fn test_load_parquet_row() {
        let rows: [(&[f64], &[f64]); 2] = [
            (&[1.0, 2.0], &[0.1, 0.2]),
            (&[500.0, 600.0, 700.0], &[0.5, 0.6, 0.7]),
        ];
        let mut x_builder = ListBuilder::new(Float64Builder::new());
        let mut y_builder = ListBuilder::new(Float64Builder::new());
        for (x, y) in rows {
            x_builder.values().append_slice(x);
            x_builder.append(true);
            y_builder.values().append_slice(y);
            y_builder.append(true);
        }
        let item = Arc::new(Field::new("item", DataType::Float64, true));
        let schema = Arc::new(Schema::new(vec![
            Field::new("x", DataType::List(item.clone()), false),
            Field::new("y", DataType::List(item), false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(x_builder.finish()) as ArrayRef,
                Arc::new(y_builder.finish()) as ArrayRef,
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let config = LoaderConfig {
            wavelength_scale: NANOMETERS_TO_MICRONS,
            row: 1,
        };
        let sp = load_file(file.path(), &config).unwrap();
        assert_eq!(sp.len(), 3);
        assert!((sp.wavelength[1] - 0.6).abs() < 1e-12);
        assert_eq!(sp.reflectance, vec![0.5, 0.6, 0.7]);
    }

    #[test]
    fn test_list_cell_values_large_list_f32() {
        let mut builder = LargeListBuilder::new(Float32Builder::new());
        builder.values().append_slice(&[0.5, 0.25]);
        builder.append(true);
        builder.values().append_value(1.5);
        builder.values().append_null();
        builder.append(true);
        let column = builder.finish();

        assert_eq!(list_cell_values(&column, 0).unwrap(), vec![0.5, 0.25]);
        let second = list_cell_values(&column, 1).unwrap();
        assert_eq!(second[0], 1.5);
        assert!(second[1].is_nan());
    }

    #[test]
    fn test_list_cell_values_rejects_plain_column() {
        let mut builder = Float64Builder::new();
        builder.append_value(1.0);
        let column = builder.finish();
        assert!(list_cell_values(&column, 0).is_err());
    }
}
