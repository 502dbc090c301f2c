use crate::error::{Error, Result};
use crate::index::{DocId, Record};
use std::io::BufRead;

/// Read one record per line, numbering lines from 0.
///
/// Blank lines are kept so ids always equal line numbers.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    read_lines_from(reader, 0)
}

/// Like [`read_lines`], with the first line numbered `first_id`.
pub fn read_lines_from<R: BufRead>(reader: R, first_id: usize) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        let id = doc_id(first_id.saturating_add(line_no))?;
        records.push(Record { id, text: line });
    }
    Ok(records)
}

fn doc_id(n: usize) -> Result<DocId> {
    DocId::try_from(n).map_err(|_| Error::IdOverflow(n))
}

/// Assign sequential ids to in-memory texts. Texts past `DocId::MAX` are not numbered.
pub fn from_texts<I, S>(texts: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .zip(0..=DocId::MAX)
        .map(|(text, id)| Record::new(id, text))
        .collect()
}
