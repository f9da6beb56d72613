//! The aggregation use case: turn indexed scan reports into per-check observations.

use camino::Utf8Path;
use conforma_domain::{subjects_for_report, to_evidence};
use conforma_repo::{ResultIndex, file_uri, write_evidence};
use conforma_types::{Link, ObservationByCheck, PipelineError, RuleSet, ids};
use time::OffsetDateTime;
use tracing::{Span, debug, info};

/// Builds observations and writes one evidence file per check into an output directory.
///
/// Aggregations sharing an output directory race on `<checkId>.ocsf`; callers serialize them
/// or use separate directories.
#[derive(Clone, Debug)]
pub struct Aggregator {
    span: Span,
}

impl Aggregator {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// One observation per catalog check with at least one report, in catalog order.
    ///
    /// Checks without reports are skipped. The first failure aborts the call.
    pub fn aggregate(
        &self,
        catalog: &[RuleSet],
        index: &ResultIndex,
        out_dir: &Utf8Path,
    ) -> Result<Vec<ObservationByCheck>, PipelineError> {
        let mut observations = Vec::new();

        for rule_set in catalog {
            for check in &rule_set.checks {
                let reports = index.lookup(&check.id);
                if reports.is_empty() {
                    debug!(parent: &self.span, check_id = %check.id, "no scan results for check");
                    continue;
                }

                let mut observation = ObservationByCheck {
                    title: rule_set.rule.id.clone(),
                    description: format!("Observation of check {}", check.id),
                    check_id: check.id.clone(),
                    methods: vec![ids::METHOD_TEST_AUTOMATED.to_string()],
                    collected: OffsetDateTime::now_utc(),
                    relevant_evidences: Vec::new(),
                    subjects: Vec::new(),
                };

                for report in reports {
                    let evidence = to_evidence(report, &check.id)?;
                    let path = write_evidence(out_dir, &check.id, &evidence)?;
                    debug!(parent: &self.span, check_id = %check.id, path = %path, "wrote evidence");

                    observation.relevant_evidences.push(Link {
                        href: file_uri(&path),
                        description: ids::LINK_OCSF_FILE.to_string(),
                    });
                    observation.subjects.extend(subjects_for_report(report));
                }

                observations.push(observation);
            }
        }

        info!(
            parent: &self.span,
            observations = observations.len(),
            "aggregated scan results"
        );
        Ok(observations)
    }
}
