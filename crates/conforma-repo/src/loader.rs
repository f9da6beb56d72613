use camino::{Utf8Path, Utf8PathBuf};
use conforma_types::{PipelineError, Report, ids};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{Span, debug, info};
use walkdir::{DirEntry, WalkDir};

/// Scan reports grouped by the check id derived from their file name.
///
/// Built once per load and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultIndex {
    reports: BTreeMap<String, Vec<Report>>,
}

impl ResultIndex {
    /// Reports for `check_id` in discovery order; empty when none were found.
    pub fn lookup(&self, check_id: &str) -> &[Report] {
        self.reports
            .get(check_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn insert(&mut self, check_id: impl Into<String>, report: Report) {
        self.reports.entry(check_id.into()).or_default().push(report);
    }

    /// Number of distinct check ids.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn report_count(&self) -> usize {
        self.reports.values().map(Vec::len).sum()
    }

    pub fn check_ids(&self) -> impl Iterator<Item = &str> {
        self.reports.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Report)> for ResultIndex {
    fn from_iter<I: IntoIterator<Item = (String, Report)>>(iter: I) -> Self {
        let mut index = ResultIndex::default();
        for (check_id, report) in iter {
            index.insert(check_id, report);
        }
        index
    }
}

/// Discovers `<checkId>.json` scan results below a directory.
#[derive(Clone, Debug)]
pub struct ResultLoader {
    span: Span,
}

impl ResultLoader {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Walk `dir` recursively and index every result file by check id.
    ///
    /// Entries are visited in file-name order, so reports sharing a check id keep a stable
    /// order across runs and platforms. The first unreadable or malformed file aborts the load; nothing indexed so far
    /// is returned. Other files and directories are ignored.
    pub fn load(&self, dir: &Utf8Path) -> Result<ResultIndex, PipelineError> {
        let index = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .try_fold(ResultIndex::default(), |index, entry| {
                let entry = entry.map_err(|err| walk_error(dir, err))?;
                self.index_entry(index, &entry)
            })?;

        info!(
            parent: &self.span,
            dir = %dir,
            checks = index.len(),
            reports = index.report_count(),
            "loaded scan results"
        );
        Ok(index)
    }

    fn index_entry(
        &self,
        mut index: ResultIndex,
        entry: &DirEntry,
    ) -> Result<ResultIndex, PipelineError> {
        let Some(check_id) = check_id_for(entry) else {
            return Ok(index);
        };

        let path = utf8_lossy(entry.path());
        let bytes =
            std::fs::read(entry.path()).map_err(|e| PipelineError::io(path.clone(), e))?;
        let report: Report =
            serde_json::from_slice(&bytes).map_err(|source| PipelineError::Parse {
                file: path.to_string(),
                source,
            })?;

        debug!(parent: &self.span, check_id = %check_id, path = %path, "indexed scan result");
        index.insert(check_id, report);
        Ok(index)
    }
}

/// `check-1.json` -> `check-1`; `None` for anything that is not a result file.
///
/// Names that are not valid UTF-8 are indexed under their lossy form.
fn check_id_for(entry: &DirEntry) -> Option<String> {
    if !entry.file_type().is_file() {
        return None;
    }
    entry
        .file_name()
        .to_string_lossy()
        .strip_suffix(ids::RESULT_FILE_EXTENSION)?
        .strip_suffix('.')
        .map(str::to_owned)
}

fn walk_error(root: &Utf8Path, err: walkdir::Error) -> PipelineError {
    let path = err
        .path()
        .map(utf8_lossy)
        .unwrap_or_else(|| root.to_path_buf());
    PipelineError::io(path, std::io::Error::other(err))
}

fn utf8_lossy(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from(path.to_string_lossy().into_owned())
}
