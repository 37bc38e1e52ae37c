//! Module turning template files into rendered files with every placeholder resolved.

use std::path::{Path, PathBuf};

use calamine::Data;
use tracing::{debug, info};

use crate::{
    error::{Result, io_error},
    fixture::TestData,
    generate::Generator,
    input::{self, FileFormat, Row, Sheet},
    output,
};

mod resolve;
pub(crate) mod token;


use resolve::{Location, Resolver};

/// Renders templates into a working directory owned by one worker.
///
/// Parallel workers must use distinct worker ids: files are only unique within a worker's directory.
#[derive(Debug)]
pub struct TemplateRenderer {
    output_dir: PathBuf,
    sequence: u32,
}

impl TemplateRenderer {
    /// Creates a renderer writing into `<working_dir>/<worker_id>`. The directory is created on first render.
    pub fn new(working_dir: impl AsRef<Path>, worker_id: &str) -> Self {
        Self {
            output_dir: working_dir.as_ref().join(worker_id),
            sequence: 0,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders `template` into a new file named after `file_name_prefix` and returns its path.
    ///
    /// The rendered file keeps the template's format: CSV stays CSV (quoted where needed), workbooks keep their
    /// sheets, other files are rendered line by line. A zero-byte template yields a zero-byte file.
    /// The template itself is never modified.
    pub fn render(
        &mut self,
        template: &Path,
        file_name_prefix: &str,
        data: &TestData,
        generator: &mut Generator,
    ) -> Result<PathBuf> {
        let metadata = std::fs::metadata(template).map_err(io_error(template))?;

        std::fs::create_dir_all(&self.output_dir).map_err(io_error(&self.output_dir))?;
        let output_path = self.next_output_path(template, file_name_prefix);

        if metadata.len() == 0 {
            output::touch(&output_path)?;
            info!(
                template = %template.display(),
                output = %output_path.display(),
                "empty template, created empty file"
            );
            return Ok(output_path);
        }

        let mut resolver = Resolver::new(data, generator);
        match FileFormat::of(template) {
            FileFormat::Csv => {
                let rows = input::read_csv(template)?;
                let rendered = render_rows(&rows, template, &mut resolver)?;
                debug!(rows = rendered.len(), "rendered CSV rows");
                output::write_csv(&output_path, &rendered)?;
            }
            FileFormat::Xlsx => {
                let sheets = input::read_workbook(template)?;
                let rendered = sheets
                    .iter()
                    .map(|sheet| -> Result<Sheet> {
                        Ok(Sheet {
                            name: sheet.name.clone(),
                            rows: render_cells(&sheet.rows, template, &mut resolver)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                debug!(sheets = rendered.len(), "rendered workbook");
                output::write_workbook(&output_path, &rendered)?;
            }
            FileFormat::Text => {
                let text = input::read_text(template)?;
                let rendered = render_lines(&text, template, &mut resolver)?;
                output::write_text(&output_path, &rendered)?;
            }
        }

        info!(template = %template.display(), output = %output_path.display(), "rendered template");
        Ok(output_path)
    }

    fn next_output_path(&mut self, template: &Path, file_name_prefix: &str) -> PathBuf {
        self.sequence += 1;
        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f");
        self.output_dir.join(format!(
            "{file_name_prefix}{timestamp}_{}{}",
            self.sequence,
            output_extension(template)
        ))
    }
}

/// Extension of the file rendered from `template`, dot included. Workbooks of any kind are written as xlsx.
fn output_extension(template: &Path) -> String {
    match (FileFormat::of(template), template.extension()) {
        (FileFormat::Xlsx, _) => ".xlsx".to_string(),
        (_, Some(extension)) => format!(".{}", extension.to_string_lossy()),
        (_, None) => String::new(),
    }
}

fn render_rows(rows: &[Row], template: &Path, resolver: &mut Resolver<'_>) -> Result<Vec<Row>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let location = Location {
                template,
                row: i + 1,
            };
            row.iter()
                .map(|cell| resolver.substitute_cell(cell, location))
                .collect()
        })
        .collect()
}

/// Renders workbook cells. Only text cells can hold tokens; numbers, dates and booleans are kept as they are.
fn render_cells(
    rows: &[Vec<Data>],
    template: &Path,
    resolver: &mut Resolver<'_>,
) -> Result<Vec<Vec<Data>>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let location = Location {
                template,
                row: i + 1,
            };
            row.iter()
                .map(|cell| match cell {
                    Data::String(text) => {
                        Ok(Data::String(resolver.substitute_cell(text, location)?))
                    }
                    other => Ok(other.clone()),
                })
                .collect()
        })
        .collect()
}

fn render_lines(text: &str, template: &Path, resolver: &mut Resolver<'_>) -> Result<String> {
    let mut rendered = String::with_capacity(text.len());
    // tokens never span a line break, so each line can be tokenized on its own
    for (i, line) in text.split_inclusive('\n').enumerate() {
        let location = Location {
            template,
            row: i + 1,
        };
        rendered.push_str(&resolver.substitute(line, location)?);
    }
    Ok(rendered)
}
