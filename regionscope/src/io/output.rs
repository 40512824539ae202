use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::Path;

use crate::data_structs::ResultRow;
use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};

/// Writes crop query results, one `x y category group_id` record per line.
pub struct ResultWriter<W: Write> {
    sink:    BufWriter<W>,
    label:   String,
    written: usize,
}

impl ResultWriter<File> {
    /// Creates (or truncates) the file at `path`.
    pub fn try_from_path(path: impl AsRef<Path>) -> RegionScopeResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| RegionScopeError::io(path, e))?;
        Ok(Self::with_label(file, path.display().to_string()))
    }
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_label(sink, "<output>")
    }

    fn with_label(
        sink: W,
        label: impl Into<String>,
    ) -> Self {
        Self {
            sink:    BufWriter::new(sink),
            label:   label.into(),
            written: 0,
        }
    }

    pub fn write_row(
        &mut self,
        row: &ResultRow,
    ) -> RegionScopeResult<()> {
        writeln!(self.sink, "{}", row).map_err(|e| RegionScopeError::io(&self.label, e))?;
        self.written += 1;
        Ok(())
    }

    pub fn write_rows<'a, I>(
        &mut self,
        rows: I,
    ) -> RegionScopeResult<()>
    where
        I: IntoIterator<Item = &'a ResultRow>, {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Number of rows written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes buffered rows and returns the underlying sink.
    pub fn finish(self) -> RegionScopeResult<W> {
        let label = self.label;
        self.sink
            .into_inner()
            .map_err(|e| RegionScopeError::io(label, e.into_error()))
    }
}
