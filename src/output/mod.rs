//! Module writing rendered rows back in the structural format of their template.

use std::{fs::File, path::Path};

use calamine::Data;
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    error::{Result, io_error},
    input::{Row, Sheet},
};


/// Writes rows as CSV. Fields are quoted only where needed, e.g. when they contain a comma.
pub(crate) fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(io_error(path))?;
    Ok(())
}

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// Writes a workbook with the given sheets, keeping names and order. Cells keep their type: numbers and booleans
/// are written as such, dates as serial numbers with a date format. Empty cells are skipped.
pub(crate) fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<()> {
    let date = Format::new().set_num_format(DATE_FORMAT);
    let date_time = Format::new().set_num_format(DATE_TIME_FORMAT);
    let duration = Format::new().set_num_format(DURATION_FORMAT);

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for (r, row) in sheet.rows.iter().enumerate() {
            let r = r as u32;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Data::Empty => {}
                    Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
                        worksheet.write_string(r, c, text)?;
                    }
                    Data::Float(number) => {
                        worksheet.write_number(r, c, *number)?;
                    }
                    Data::Int(number) => {
                        worksheet.write_number(r, c, *number as f64)?;
                    }
                    Data::Bool(flag) => {
                        worksheet.write_boolean(r, c, *flag)?;
                    }
                    Data::DateTime(value) => {
                        let serial = value.as_f64();
                        let format = if value.is_duration() {
                            &duration
                        } else if serial.fract() == 0.0 {
                            &date
                        } else {
                            &date_time
                        };
                        worksheet.write_number_with_format(r, c, serial, format)?;
                    }
                    Data::Error(error) => {
                        worksheet.write_string(r, c, error.to_string())?;
                    }
                }
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}

pub(crate) fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(io_error(path))
}

/// Creates an empty file, truncating an existing one
pub(crate) fn touch(path: &Path) -> Result<()> {
    File::create(path).map_err(io_error(path))?;
    Ok(())
}
