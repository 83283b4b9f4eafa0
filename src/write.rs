// src/write.rs
use anyhow::{anyhow, Context, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

use crate::pricing::{convert, PriceTable};

/// Spreadsheet dialect the catalog importer reads: comma separated,
/// minimal quoting with doubled quotes, CRLF record terminator.
fn importer_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(writer)
}

/// Writes header then rows in the importer's dialect.
pub fn write_table<W: io::Write>(table: &PriceTable, writer: W) -> Result<()> {
    let mut wtr = importer_writer(writer);
    wtr.write_record(&table.header)
        .context("writing header record")?;
    for (idx, row) in table.rows.iter().enumerate() {
        wtr.write_record(row)
            .with_context(|| format!("writing row {}", idx + 1))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(table: &PriceTable) -> Result<String> {
    let mut buf = Vec::new();
    write_table(table, &mut buf)?;
    String::from_utf8(buf).context("serialized table is not UTF-8")
}

/// Reads a table written by [`write_table`] back into memory. The first
/// record is the header.
pub fn read_table<R: io::Read>(reader: R) -> Result<PriceTable> {
    let mut rdr = ReaderBuilder::new().has_headers(false).from_reader(reader);
    let mut records = rdr.records();

    let header: Vec<String> = records
        .next()
        .ok_or_else(|| anyhow!("table has no header record"))?
        .context("reading header record")?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = records
        .enumerate()
        .map(|(idx, rec)| {
            rec.map(|r| r.iter().map(str::to_string).collect::<Vec<String>>())
                .with_context(|| format!("reading row {}", idx + 1))
        })
        .collect::<Result<Vec<Vec<String>>>>()?;

    Ok(PriceTable { header, rows })
}

/// Writes the table to `path` all-or-nothing: the data goes to a hidden
/// sibling file which is renamed over `path` once fully flushed.
#[instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display(), rows = table.rows.len()))]
pub fn write_table_file<P: AsRef<Path>>(table: &PriceTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("output path {:?} has no file name", path))?
        .to_string_lossy();
    let tmp_path: PathBuf = path.with_file_name(format!(".{}.tmp", file_name));

    let written = (|| -> Result<()> {
        let mut tmp = fs::File::create(&tmp_path)
            .with_context(|| format!("creating {:?}", tmp_path))?;
        write_table(table, &mut tmp)?;
        tmp.flush()?;
        tmp.sync_all()
            .with_context(|| format!("syncing {:?}", tmp_path))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))
    })();

    if written.is_err() {
        // nothing to clean up if creation itself failed
        let _ = fs::remove_file(&tmp_path);
    }
    written?;

    debug!("wrote table");
    Ok(())
}

/// Reads a feed file the way a text-mode reader would: CRLF and lone CR
/// line endings both become LF before the feed reaches [`convert`].
pub fn read_feed<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    Ok(raw.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Reads the feed at `input`, converts it, and writes the importer CSV to
/// `output`. Any failure leaves `output` untouched.
#[instrument(level = "info", skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
pub fn convert_and_write<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let feed = read_feed(&input)?;
    let table = convert(&feed)
        .with_context(|| format!("converting {:?}", input.as_ref()))?;
    info!(products = table.rows.len(), "converted feed");
    write_table_file(&table, &output)
}
