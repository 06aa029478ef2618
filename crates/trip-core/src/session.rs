//! Session state: the single writer of the current dataset and the active
//! view selection.

use tracing::{debug, info, warn};

use trip_ingest::IngestOptions;
use trip_map::RoleLexicon;
use trip_model::{MergedDataset, RawSource, Row, RowSet, SemanticRole, SourceId};

use crate::error::MergeError;
use crate::facets::options_for;
use crate::merge::merge;
use crate::query::{Criteria, evaluate};

/// Which row collection queries and facet lists run against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceScope {
    /// The merged multi-source collection.
    #[default]
    Unified,
    /// One source's native collection.
    Source(SourceId),
}

/// Hooks the presentation layer registers to hear about dataset changes.
/// All methods default to no-ops.
pub trait SessionObserver {
    fn dataset_loaded(&self, _dataset: &MergedDataset) {}
    fn load_failed(&self, _reason: &str) {}
}

/// Token tying a load attempt to its generation. Obtained from
/// [`Session::begin_load`] before fetching; handed back when installing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
}

/// What installing a load attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The dataset was replaced.
    Installed,
    /// A newer load already completed; this result was discarded.
    Discarded,
}

/// Owner of the current dataset and the active criteria.
///
/// The session is the only writer: loads replace the dataset atomically
/// (readers never observe a half-updated set of per-source views), a
/// failed or empty merge leaves the previous dataset untouched, and a
/// stale load result from a superseded generation is discarded silently.
pub struct Session {
    lexicon: RoleLexicon,
    options: IngestOptions,
    dataset: Option<MergedDataset>,
    scope: SourceScope,
    criteria: Criteria,
    generation: u64,
    installed_generation: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    #[must_use]
    pub fn new(lexicon: RoleLexicon, options: IngestOptions) -> Self {
        Self {
            lexicon,
            options,
            dataset: None,
            scope: SourceScope::default(),
            criteria: Criteria::default(),
            generation: 0,
            installed_generation: 0,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Start a load attempt. Each call supersedes earlier tokens: a result
    /// installed under an older token after a newer one has landed is
    /// discarded.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        debug!(generation = self.generation, "load started");
        LoadToken {
            generation: self.generation,
        }
    }

    /// Merge pre-fetched sources and install the result.
    ///
    /// On `NoData` the previous dataset stays active and observers hear
    /// `load_failed`; a working dataset is never replaced by an empty one.
    pub fn load(
        &mut self,
        token: LoadToken,
        sources: &[(SourceId, RawSource)],
    ) -> Result<LoadOutcome, MergeError> {
        if token.generation <= self.installed_generation {
            debug!(
                generation = token.generation,
                installed = self.installed_generation,
                "stale load discarded"
            );
            return Ok(LoadOutcome::Discarded);
        }
        match merge(sources, &self.options, &self.lexicon) {
            Ok(dataset) => {
                self.installed_generation = token.generation;
                info!(
                    generation = token.generation,
                    rows = dataset.unified.len(),
                    "dataset installed"
                );
                for observer in &self.observers {
                    observer.dataset_loaded(&dataset);
                }
                self.dataset = Some(dataset);
                Ok(LoadOutcome::Installed)
            }
            Err(error) => {
                warn!(%error, "load rejected; previous dataset retained");
                let reason = error.to_string();
                for observer in &self.observers {
                    observer.load_failed(&reason);
                }
                Err(error)
            }
        }
    }

    /// Report a whole-load retrieval failure (the all-or-nothing fetch
    /// join failed). The previous dataset stays active.
    pub fn fail_load(&mut self, token: LoadToken, reason: &str) {
        if token.generation <= self.installed_generation {
            debug!(generation = token.generation, "stale failure discarded");
            return;
        }
        warn!(reason, "load failed; previous dataset retained");
        for observer in &self.observers {
            observer.load_failed(reason);
        }
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&MergedDataset> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn scope(&self) -> &SourceScope {
        &self.scope
    }

    pub fn set_scope(&mut self, scope: SourceScope) {
        self.scope = scope;
    }

    #[must_use]
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = criteria;
    }

    /// The explicit clear action: facets back to "any", text inputs empty,
    /// scope back to the unified view.
    pub fn clear_criteria(&mut self) {
        self.criteria = Criteria::default();
        self.scope = SourceScope::Unified;
    }

    /// The row collection the active scope selects.
    #[must_use]
    pub fn active_view(&self) -> Option<&RowSet> {
        let dataset = self.dataset.as_ref()?;
        match &self.scope {
            SourceScope::Unified => Some(&dataset.unified),
            SourceScope::Source(id) => dataset.view_for(id),
        }
    }

    /// Facet options for the active view. Recomputed on every call; a
    /// session without a dataset yields just the sentinel.
    #[must_use]
    pub fn facet_options(&self, role: SemanticRole) -> Vec<String> {
        match self.active_view() {
            Some(view) => options_for(role, view, &self.lexicon),
            None => vec![trip_model::ANY_SENTINEL.to_string()],
        }
    }

    /// Evaluate the active criteria against the active view.
    #[must_use]
    pub fn query(&self) -> Vec<&Row> {
        match self.active_view() {
            Some(view) => evaluate(view, &self.criteria, &self.lexicon),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use trip_model::ANY_SENTINEL;

    use super::*;

    fn keyed(fields: &[&str], rows: &[&[(&str, &str)]]) -> RawSource {
        RawSource::Keyed {
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    fn day(date: &str, place: &str) -> RawSource {
        keyed(
            &["วันที่", "สถานที่"],
            &[&[("วันที่", date), ("สถานที่", place)]],
        )
    }

    fn session() -> Session {
        Session::new(RoleLexicon::default(), IngestOptions::default())
    }

    #[derive(Default)]
    struct Recorder {
        loads: RefCell<usize>,
        failures: RefCell<Vec<String>>,
    }

    struct RecorderHandle(Rc<Recorder>);

    impl SessionObserver for RecorderHandle {
        fn dataset_loaded(&self, _dataset: &MergedDataset) {
            *self.0.loads.borrow_mut() += 1;
        }
        fn load_failed(&self, reason: &str) {
            self.0.failures.borrow_mut().push(reason.to_string());
        }
    }

    #[test]
    fn load_installs_and_notifies() {
        let recorder = Rc::new(Recorder::default());
        let mut session = session();
        session.add_observer(Box::new(RecorderHandle(Rc::clone(&recorder))));

        let token = session.begin_load();
        let sources = vec![(SourceId::new("day1.csv"), day("Jan 1", "Wat Pho"))];
        assert_eq!(session.load(token, &sources).unwrap(), LoadOutcome::Installed);
        assert_eq!(*recorder.loads.borrow(), 1);
        assert_eq!(session.query().len(), 1);
    }

    #[test]
    fn no_data_keeps_previous_dataset() {
        let recorder = Rc::new(Recorder::default());
        let mut session = session();
        session.add_observer(Box::new(RecorderHandle(Rc::clone(&recorder))));

        let token = session.begin_load();
        let good = vec![(SourceId::new("day1.csv"), day("Jan 1", "Wat Pho"))];
        session.load(token, &good).unwrap();

        let token = session.begin_load();
        let empty = vec![(
            SourceId::new("legend.csv"),
            keyed(&["Note"], &[&[("Note", "ค่าเข้า 100 บาท")]]),
        )];
        assert!(session.load(token, &empty).is_err());
        // Previous dataset still answers queries.
        assert_eq!(session.query().len(), 1);
        assert_eq!(recorder.failures.borrow().len(), 1);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut session = session();
        let stale = session.begin_load();
        let fresh = session.begin_load();

        let newer = vec![(SourceId::new("day2.csv"), day("Jan 2", "Chinatown"))];
        assert_eq!(
            session.load(fresh, &newer).unwrap(),
            LoadOutcome::Installed
        );

        let older = vec![(SourceId::new("day1.csv"), day("Jan 1", "Wat Pho"))];
        assert_eq!(
            session.load(stale, &older).unwrap(),
            LoadOutcome::Discarded
        );
        let matched = session.query();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].value("สถานที่"), "Chinatown");
    }

    #[test]
    fn fetch_failure_keeps_dataset_and_notifies_once() {
        let recorder = Rc::new(Recorder::default());
        let mut session = session();
        session.add_observer(Box::new(RecorderHandle(Rc::clone(&recorder))));

        let token = session.begin_load();
        let sources = vec![(SourceId::new("day1.csv"), day("Jan 1", "Wat Pho"))];
        session.load(token, &sources).unwrap();

        let token = session.begin_load();
        session.fail_load(token, "fetch day2.csv: connection refused");

        assert_eq!(session.query().len(), 1);
        assert_eq!(
            recorder.failures.borrow().as_slice(),
            ["fetch day2.csv: connection refused"]
        );
    }

    #[test]
    fn fetch_failure_on_first_load_leaves_no_dataset() {
        let mut session = session();
        let token = session.begin_load();
        session.fail_load(token, "all fetches failed");
        assert!(session.dataset().is_none());
        assert!(session.query().is_empty());
        assert_eq!(
            session.facet_options(SemanticRole::Date),
            vec![ANY_SENTINEL]
        );
    }

    #[test]
    fn scope_switches_between_views() {
        let mut session = session();
        let token = session.begin_load();
        let sources = vec![
            (SourceId::new("day1.csv"), day("Jan 1", "Wat Pho")),
            (SourceId::new("day2.csv"), day("Jan 2", "Chinatown")),
        ];
        session.load(token, &sources).unwrap();

        assert_eq!(session.query().len(), 2);
        assert_eq!(
            session.facet_options(SemanticRole::Date),
            vec![ANY_SENTINEL, "Jan 1", "Jan 2"]
        );

        session.set_scope(SourceScope::Source(SourceId::new("day2.csv")));
        assert_eq!(session.query().len(), 1);
        assert_eq!(
            session.facet_options(SemanticRole::Date),
            vec![ANY_SENTINEL, "Jan 2"]
        );
    }

    #[test]
    fn clear_resets_criteria_and_scope() {
        let mut session = session();
        let token = session.begin_load();
        let sources = vec![
            (SourceId::new("day1.csv"), day("Jan 1", "Wat Pho")),
            (SourceId::new("day2.csv"), day("Jan 2", "Chinatown")),
        ];
        session.load(token, &sources).unwrap();

        session.set_scope(SourceScope::Source(SourceId::new("day1.csv")));
        session.set_criteria(Criteria {
            date: Some("Jan 1".to_string()),
            query: "wat".to_string(),
            ..Criteria::default()
        });
        assert_eq!(session.query().len(), 1);

        session.clear_criteria();
        assert!(session.criteria().is_clear());
        assert_eq!(session.scope(), &SourceScope::Unified);
        assert_eq!(session.query().len(), 2);
    }
}
