pub mod metadata;
pub mod walk;

use crate::changelog::{ChangeLog, ChangeLogEntry};
use crate::config::RunConfig;
use crate::error::{Result, RunError};
use crate::exclusion::IgnoreList;
use crate::fixtures;
use crate::grammar::Grammar;
use crate::prune;
use crate::router::{self, ClassifyPolicy, Decision, FileRecord, IgnoreReason, Route};
use crate::tokenizer::{Tokenizer, TokenizerOptions};
use indicatif::{ProgressBar, ProgressStyle};
use metadata::ArtistTags;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: u64,
    pub no_artist: u64,
    pub single: u64,
    pub ignored: u64,
    pub processed: u64,
    pub tags_written: u64,
    pub moved: u64,
    pub pruned: u64,
}

/// Process every audio file under the input root, one at a time, in
/// enumeration order. Tag-write and relocation failures abort the run.
pub fn run(config: &RunConfig, tags: &dyn ArtistTags) -> Result<RunSummary> {
    if config.stage_fixtures {
        fixtures::stage(&config.fixtures_dir, &config.input_dir)?;
    }
    if !config.input_dir.is_dir() {
        return Err(RunError::MissingInput(config.input_dir.clone()));
    }

    let ignore_list = IgnoreList::load(&config.ignore_file)?;
    let mut change_log = ChangeLog::create(&config.change_log)?;
    let tokenizer = Tokenizer::new(
        Grammar::default(),
        TokenizerOptions {
            strip_unsafe: config.strip_unsafe,
            unsafe_char: config.unsafe_char,
        },
    );
    let policy = ClassifyPolicy {
        ignore_list: &ignore_list,
        ignore_slash: config.ignore_slash,
        separator: &config.separator,
    };

    let files = walk::list_files(
        &config.input_dir,
        &[config.output_dir.as_path(), config.ignored_dir.as_path()],
    );
    log::info!("Found {} audio files in {}", files.len(), config.input_dir.display());

    let pb = ProgressBar::new(files.len() as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut summary = RunSummary::default();

    for relative in &files {
        let record = FileRecord::new(
            relative,
            &config.input_dir,
            &config.output_dir,
            &config.ignored_dir,
        );
        summary.scanned += 1;

        let raw = match tags.read_artist(&record.input) {
            Ok(raw) => raw,
            Err(e) => {
                pb.suspend(|| log::warn!("{e}"));
                None
            }
        };

        let decision = router::classify(raw.as_deref(), &tokenizer, &policy);
        pb.suspend(|| report(&record, raw.as_deref(), &decision));

        // A conflict must abort before the tag or the change log is touched
        let route = router::resolve_route(&decision, config.flags);
        router::check_destination(&record, route)?;

        match &decision {
            Decision::NoArtist => summary.no_artist += 1,
            Decision::SingleArtist => summary.single += 1,
            Decision::Ignored { .. } => summary.ignored += 1,
            Decision::Processed { rewritten, .. } => {
                summary.processed += 1;
                change_log.append(&ChangeLogEntry {
                    original: raw.clone().unwrap_or_default(),
                    rewritten: rewritten.clone(),
                })?;
                if config.flags.update {
                    tags.write_artist(&record.input, rewritten)?;
                    summary.tags_written += 1;
                }
            }
        }

        if route != Route::Stay && router::relocate(&record, route)?.is_some() {
            summary.moved += 1;
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    // Dry runs leave the library tree exactly as found.
    if config.flags.update {
        prune::ensure_keep(&config.input_dir)?;
        summary.pruned = prune::prune(&config.input_dir)?.removed;
    }

    log::debug!("{} change log entries in {}", change_log.entries(), change_log.path().display());
    Ok(summary)
}

fn report(record: &FileRecord, raw: Option<&str>, decision: &Decision) {
    let file = record.relative.display();
    let raw = raw.unwrap_or_default();
    match decision {
        Decision::NoArtist => log::info!("\"{file}\" has no artist."),
        Decision::SingleArtist => log::info!("Skipping \"{file}\". It only has one artist."),
        Decision::Ignored { reason: IgnoreReason::ListRule(rule) } => {
            log::warn!("Ignoring \"{file}\" ({raw}): matches ignore rule \"{rule}\"")
        }
        Decision::Ignored { reason: IgnoreReason::UnsafeSeparator(name) } => {
            log::warn!("Ignoring \"{file}\" ({raw}): artist \"{name}\" contains a path separator")
        }
        Decision::Processed { rewritten, .. } => log::info!("\"{file}\": {raw} -> {rewritten}"),
    }
}
