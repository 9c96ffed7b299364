//! JSON and CSV export of finalized listings.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bizscan_core::BusinessRecord;

pub(crate) const JSON_FILE_NAME: &str = "bizbuysell_florida_data.json";
pub(crate) const CSV_FILE_NAME: &str = "bizbuysell_florida_data.csv";

/// CSV header, in column order.
pub(crate) const CSV_COLUMNS: [&str; 15] = [
    "id",
    "title",
    "description",
    "price",
    "sde",
    "revenue",
    "multiplier",
    "niche",
    "location",
    "county",
    "region",
    "sourceUrl",
    "source",
    "foundDate",
    "lastModified",
];

/// Writes both export files into `output_dir`, creating it if needed.
///
/// Both files are always rewritten, so an empty run leaves `[]` and a
/// header-only CSV rather than a previous run's results.
///
/// Returns the JSON and CSV paths, in that order.
///
/// # Errors
///
/// Returns an error if the directory or either file cannot be written.
pub(crate) fn export_all(
    output_dir: &Path,
    records: &[BusinessRecord],
) -> anyhow::Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;

    let json_path = output_dir.join(JSON_FILE_NAME);
    let file = File::create(&json_path)
        .with_context(|| format!("failed to create {}", json_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, records)?;
    writer.flush()?;
    tracing::info!(path = %json_path.display(), records = records.len(), "wrote JSON export");

    let csv_path = output_dir.join(CSV_FILE_NAME);
    let file = File::create(&csv_path)
        .with_context(|| format!("failed to create {}", csv_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, records)?;
    writer.flush()?;
    tracing::info!(path = %csv_path.display(), records = records.len(), "wrote CSV export");

    Ok((json_path, csv_path))
}

/// Pretty-printed JSON array of every record.
pub(crate) fn write_json<W: Write>(mut w: W, records: &[BusinessRecord]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut w, records).context("failed to serialize listings")?;
    writeln!(w)?;
    Ok(())
}

/// Header row followed by one row per record. Absent values are empty cells.
pub(crate) fn write_csv<W: Write>(mut w: W, records: &[BusinessRecord]) -> io::Result<()> {
    let header: Vec<String> = CSV_COLUMNS.iter().map(|c| (*c).to_owned()).collect();
    write_row(&mut w, &header)?;
    for record in records {
        write_row(&mut w, &csv_row(record))?;
    }
    Ok(())
}

fn csv_row(r: &BusinessRecord) -> Vec<String> {
    fn opt<T: ToString>(value: Option<&T>) -> String {
        value.map(ToString::to_string).unwrap_or_default()
    }

    vec![
        r.id.clone(),
        r.title.clone(),
        r.description.clone().unwrap_or_default(),
        opt(r.price.as_ref()),
        opt(r.sde.as_ref()),
        opt(r.revenue.as_ref()),
        r.multiplier.map(|m| format!("{m:.1}")).unwrap_or_default(),
        r.niche.clone().unwrap_or_default(),
        r.location.clone(),
        r.county.clone(),
        r.region.as_str().to_owned(),
        r.source_url.clone().unwrap_or_default(),
        r.source.clone(),
        r.found_date.to_string(),
        r.last_modified.to_string(),
    ]
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizscan_core::find_area;
    use chrono::NaiveDate;

    fn record() -> BusinessRecord {
        let area = find_area("pinellas").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let mut r = BusinessRecord::new("3301".to_owned(), "Dive Shop".to_owned(), area, today);
        r.price = Some(650_000);
        r.sde = Some(150_000);
        r.revenue = Some(900_000);
        r.niche = Some("Services".to_owned());
        r.source_url = Some("https://www.bizbuysell.com/business-opportunity/3301/".to_owned());
        r.apply_multiplier();
        r
    }

    fn csv_string(records: &[BusinessRecord]) -> String {
        let mut out = Vec::new();
        write_csv(&mut out, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn csv_header_lists_columns_in_order() {
        let csv = csv_string(&[]);
        assert_eq!(
            csv,
            "id,title,description,price,sde,revenue,multiplier,niche,location,county,region,\
             sourceUrl,source,foundDate,lastModified\n"
        );
    }

    #[test]
    fn csv_row_leaves_missing_values_empty() {
        let csv = csv_string(&[record()]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "3301,Dive Shop,,650000,150000,900000,6.0,Services,\"Pinellas County, Florida\",\
             Pinellas County,central_florida,https://www.bizbuysell.com/business-opportunity/3301/,\
             BizBuySell,2024-05-20,2024-05-20"
        );
    }

    #[test]
    fn csv_quotes_embedded_quotes_and_newlines() {
        let mut r = record();
        r.title = "The \"Best\" Cafe".to_owned();
        r.description = Some("line one\nline two".to_owned());
        let csv = csv_string(&[r]);
        assert!(csv.contains("\"The \"\"Best\"\" Cafe\""));
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn json_uses_export_field_names() {
        let mut out = Vec::new();
        write_json(&mut out, &[record()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let row = &value[0];
        assert_eq!(row["sourceUrl"], "https://www.bizbuysell.com/business-opportunity/3301/");
        assert_eq!(row["foundDate"], "2024-05-20");
        assert_eq!(row["lastModified"], "2024-05-20");
        assert_eq!(row["multiplier"].as_f64(), Some(6.0));
        assert!(row["description"].is_null());
    }

    #[test]
    fn csv_multiplier_always_has_one_decimal() {
        let mut r = record();
        r.sde = Some(120_000);
        r.revenue = Some(840_000);
        r.apply_multiplier();
        let csv = csv_string(&[r]);
        assert!(csv.contains(",7.0,Services,"), "{csv}");
    }

    #[test]
    fn export_all_overwrites_previous_results_when_empty() {
        let dir = std::env::temp_dir().join(format!("bizscan-export-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(JSON_FILE_NAME), r#"[{"id":"old-run"}]"#).unwrap();

        let (json_path, csv_path) = export_all(&dir, &[]).unwrap();
        let json = std::fs::read_to_string(&json_path).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(json.trim(), "[]");
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn export_all_writes_both_files() {
        let dir = std::env::temp_dir().join(format!("bizscan-export-{}", std::process::id()));
        let (json_path, csv_path) = export_all(&dir, &[record()]).unwrap();

        let json = std::fs::read_to_string(&json_path).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(json_path.ends_with(JSON_FILE_NAME));
        assert!(csv_path.ends_with(CSV_FILE_NAME));
        assert!(json.trim_start().starts_with('['));
        assert_eq!(csv.lines().count(), 2);
    }
}
