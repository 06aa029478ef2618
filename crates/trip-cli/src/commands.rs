//! Subcommand implementations.

use anyhow::{Context, Result, bail};

use trip_core::{Criteria, Session, SourceScope};
use trip_fetch::{SourceSpec, load_sources};
use trip_ingest::IngestOptions;
use trip_map::RoleLexicon;
use trip_model::{SemanticRole, SourceId};

use crate::cli::{ConfigArgs, FacetsArgs, RolesArgs, ViewArgs};
use crate::render::{print_facet_lists, print_rows};

pub fn run_view(args: &ViewArgs) -> Result<()> {
    let mut session = build_session(&args.config)?;
    load_into(&mut session, &args.sources)?;

    if let Some(id) = &args.scope {
        session.set_scope(SourceScope::Source(SourceId::new(id.as_str())));
        if session.active_view().is_none() {
            bail!("unknown source id: {id}");
        }
    }
    session.set_criteria(criteria_from_args(args));

    let view = session
        .active_view()
        .context("no dataset loaded")?;
    let matched = session.query();
    print_rows(&view.headers, &matched);
    println!("Rows: {} (showing {} matched)", view.len(), matched.len());
    Ok(())
}

pub fn run_facets(args: &FacetsArgs) -> Result<()> {
    let mut session = build_session(&args.config)?;
    load_into(&mut session, &args.sources)?;

    let mut lists = vec![(
        "unified".to_string(),
        session.facet_options(SemanticRole::Date),
        session.facet_options(SemanticRole::Zone),
    )];
    let source_ids: Vec<SourceId> = session
        .dataset()
        .context("no dataset loaded")?
        .source_ids()
        .into_iter()
        .cloned()
        .collect();
    for id in source_ids {
        session.set_scope(SourceScope::Source(id.clone()));
        lists.push((
            id.to_string(),
            session.facet_options(SemanticRole::Date),
            session.facet_options(SemanticRole::Zone),
        ));
    }
    print_facet_lists(&lists);
    Ok(())
}

pub fn run_roles(args: &RolesArgs) -> Result<()> {
    let lexicon = load_lexicon(&args.config)?;
    for role in SemanticRole::ALL {
        println!("{role}: {}", lexicon.keywords_for(role).join(", "));
    }
    Ok(())
}

fn build_session(config: &ConfigArgs) -> Result<Session> {
    let lexicon = load_lexicon(config)?;
    let options = match &config.ingest_options {
        Some(path) => IngestOptions::from_json_file(path)
            .with_context(|| format!("load ingest options from {}", path.display()))?,
        None => IngestOptions::default(),
    };
    Ok(Session::new(lexicon, options))
}

fn load_lexicon(config: &ConfigArgs) -> Result<RoleLexicon> {
    match &config.lexicon {
        Some(path) => RoleLexicon::from_json_file(path)
            .with_context(|| format!("load lexicon from {}", path.display())),
        None => Ok(RoleLexicon::default()),
    }
}

/// Fetch, parse, and install the requested sources. A retrieval failure
/// fails the whole load and leaves any previously loaded dataset alone.
fn load_into(session: &mut Session, sources: &[String]) -> Result<()> {
    let specs: Vec<SourceSpec> = sources
        .iter()
        .map(|source| SourceSpec::from_arg(source))
        .collect();
    let token = session.begin_load();
    match load_sources(&specs) {
        Ok(raw) => {
            session.load(token, &raw).context("merge sources")?;
            Ok(())
        }
        Err(error) => {
            let reason = error.to_string();
            session.fail_load(token, &reason);
            bail!(reason);
        }
    }
}

fn criteria_from_args(args: &ViewArgs) -> Criteria {
    Criteria {
        date: args.date.clone(),
        zone: args.zone.clone(),
        place: args.place.clone().unwrap_or_default(),
        column: args.column.clone(),
        query: args.query.clone().unwrap_or_default(),
        whole_word: args.whole_word,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn view_args(argv: &[&str]) -> ViewArgs {
        ViewArgs::try_parse_from(argv).expect("parse view args")
    }

    #[test]
    fn criteria_map_one_to_one() {
        let args = view_args(&[
            "view",
            "day1.csv",
            "--date",
            "Jan 1",
            "--place",
            "wat",
            "--query",
            "temple",
            "--whole-word",
        ]);
        let criteria = criteria_from_args(&args);
        assert_eq!(criteria.date.as_deref(), Some("Jan 1"));
        assert_eq!(criteria.place, "wat");
        assert_eq!(criteria.query, "temple");
        assert!(criteria.whole_word);
        assert!(criteria.zone.is_none());
        assert!(criteria.column.is_none());
    }

    #[test]
    fn load_into_merges_files_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("day1.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "Date,Place\nJan 1,Wat Pho\n").unwrap();

        let mut session = Session::new(RoleLexicon::default(), IngestOptions::default());
        load_into(&mut session, &[path.display().to_string()]).unwrap();
        assert_eq!(session.query().len(), 1);
    }

    #[test]
    fn failed_fetch_keeps_previous_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("day1.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "Date,Place\nJan 1,Wat Pho\n").unwrap();

        let mut session = Session::new(RoleLexicon::default(), IngestOptions::default());
        load_into(&mut session, &[path.display().to_string()]).unwrap();

        let missing = dir.path().join("absent.csv").display().to_string();
        let error = load_into(&mut session, &[missing]).unwrap_err();
        assert!(error.to_string().contains("failed to load"));
        assert_eq!(session.query().len(), 1);
    }
}
