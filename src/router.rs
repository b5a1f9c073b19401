use crate::error::{IoContext, Result, RunError};
use crate::exclusion::{has_unsafe_separator, IgnoreList};
use crate::tokenizer::{ArtistList, Tokenizer};
use std::path::{Path, PathBuf};

/// Where one enumerated file lives now and where it may go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub relative: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub ignored: PathBuf,
}

impl FileRecord {
    pub fn new(
        relative: &Path,
        input_root: &Path,
        output_root: &Path,
        ignored_root: &Path,
    ) -> Self {
        Self {
            relative: relative.to_path_buf(),
            input: input_root.join(relative),
            output: output_root.join(relative),
            ignored: ignored_root.join(relative),
        }
    }

    fn destination(&self, route: Route) -> Option<&Path> {
        match route {
            Route::Stay => None,
            Route::Processed => Some(&self.output),
            Route::Ignored => Some(&self.ignored),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// An ignore-list rule matched the raw credit.
    ListRule(String),
    /// A fragment still contains the path-unsafe character.
    UnsafeSeparator(String),
}

/// Classification outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    NoArtist,
    SingleArtist,
    Ignored { reason: IgnoreReason },
    Processed { artists: ArtistList, rewritten: String },
}

/// Inputs to `classify` that come from configuration rather than the file.
#[derive(Debug, Clone)]
pub struct ClassifyPolicy<'a> {
    pub ignore_list: &'a IgnoreList,
    pub ignore_slash: bool,
    pub separator: &'a str,
}

/// Decide what a file's artist credit means.
///
/// Tiered, first match wins: absent tag → ignore rule → unsafe fragment →
/// unsplittable → processed.
pub fn classify(raw: Option<&str>, tokenizer: &Tokenizer, policy: &ClassifyPolicy<'_>) -> Decision {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return Decision::NoArtist,
    };

    if let Some(rule) = policy.ignore_list.matching_rule(raw) {
        return Decision::Ignored {
            reason: IgnoreReason::ListRule(rule.to_string()),
        };
    }

    let artists = tokenizer.tokenize(raw);

    if policy.ignore_slash {
        let unsafe_char = tokenizer.options().unsafe_char;
        if let Some(name) = artists.names().iter().find(|n| has_unsafe_separator(n, unsafe_char)) {
            return Decision::Ignored {
                reason: IgnoreReason::UnsafeSeparator(name.clone()),
            };
        }
    }

    if !artists.was_split() {
        return Decision::SingleArtist;
    }

    let rewritten = artists.render(policy.separator);
    Decision::Processed { artists, rewritten }
}

/// Destination chosen for a classified file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Stay,
    Processed,
    Ignored,
}

/// Run-mode flags that affect routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteFlags {
    /// Apply changes; when off nothing in the library tree is touched.
    pub update: bool,
    /// Keep files where they are.
    pub stay: bool,
    /// Send ignored files to the processed root.
    pub move_ignored: bool,
}

pub fn resolve_route(decision: &Decision, flags: RouteFlags) -> Route {
    if !flags.update || flags.stay {
        return Route::Stay;
    }
    match decision {
        Decision::NoArtist => Route::Stay,
        Decision::SingleArtist | Decision::Processed { .. } => Route::Processed,
        Decision::Ignored { .. } if flags.move_ignored => Route::Processed,
        Decision::Ignored { .. } => Route::Ignored,
    }
}

/// Fail if the routed destination is already occupied.
pub fn check_destination(record: &FileRecord, route: Route) -> Result<()> {
    match record.destination(route) {
        Some(dest) if dest.exists() => Err(RunError::DestinationExists(dest.to_path_buf())),
        _ => Ok(()),
    }
}

/// Move the file to its routed destination. Returns the new path, or
/// `None` for `Route::Stay`.
pub fn relocate(record: &FileRecord, route: Route) -> Result<Option<PathBuf>> {
    let Some(dest) = record.destination(route) else {
        return Ok(None);
    };

    check_destination(record, route)?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).at(parent)?;
    }
    std::fs::rename(&record.input, dest).at(&record.input)?;

    log::debug!("Moved {} -> {}", record.input.display(), dest.display());
    Ok(Some(dest.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_with(raw: Option<&str>, rules: &[&str], ignore_slash: bool) -> Decision {
        let list = IgnoreList::new(rules);
        let policy = ClassifyPolicy {
            ignore_list: &list,
            ignore_slash,
            separator: "; ",
        };
        classify(raw, &Tokenizer::default(), &policy)
    }

    const UPDATE: RouteFlags = RouteFlags { update: true, stay: false, move_ignored: false };

    #[test]
    fn tier1_absent_or_blank_is_no_artist() {
        assert_eq!(classify_with(None, &[], false), Decision::NoArtist);
        assert_eq!(classify_with(Some("   "), &[], false), Decision::NoArtist);
    }

    #[test]
    fn tier2_ignore_rule_beats_everything() {
        let d = classify_with(Some("DJ Snake, MC Ray feat. Lil Echo"), &["lil echo"], false);
        assert_eq!(
            d,
            Decision::Ignored { reason: IgnoreReason::ListRule("lil echo".into()) }
        );
        // Even a lone artist is ignored when a rule names it
        let d = classify_with(Some("Lil Echo"), &["LIL ECHO"], false);
        assert!(matches!(d, Decision::Ignored { .. }));
    }

    #[test]
    fn tier3_unsafe_fragment_only_with_policy() {
        let d = classify_with(Some("AC/DC & Queen"), &[], true);
        assert_eq!(
            d,
            Decision::Ignored { reason: IgnoreReason::UnsafeSeparator("AC/DC".into()) }
        );
        let d = classify_with(Some("AC/DC & Queen"), &[], false);
        assert!(matches!(d, Decision::Processed { .. }));
    }

    #[test]
    fn tier4_single_artist() {
        assert_eq!(classify_with(Some("Daft Punk"), &[], false), Decision::SingleArtist);
        assert_eq!(classify_with(Some("Alex G"), &[], true), Decision::SingleArtist);
    }

    #[test]
    fn separator_only_credit_is_single_artist() {
        let d = classify_with(Some(" , & "), &[], false);
        assert_eq!(d, Decision::SingleArtist);
    }

    #[test]
    fn tier5_processed_renders_list() {
        let d = classify_with(Some("DJ Snake, MC Ray feat. Lil Echo"), &[], false);
        let Decision::Processed { artists, rewritten } = &d else {
            panic!("expected Processed, got {d:?}");
        };
        assert_eq!(artists.names(), ["DJ Snake", "MC Ray", "Lil Echo"]);
        assert_eq!(rewritten, "DJ Snake; MC Ray; Lil Echo");
    }

    #[test]
    fn dry_run_and_stay_never_move() {
        let processed = classify_with(Some("A & B"), &[], false);
        for flags in [
            RouteFlags::default(),
            RouteFlags { update: false, stay: false, move_ignored: true },
            RouteFlags { update: true, stay: true, move_ignored: false },
            RouteFlags { update: true, stay: true, move_ignored: true },
        ] {
            assert_eq!(resolve_route(&processed, flags), Route::Stay, "{flags:?}");
        }
    }

    #[test]
    fn update_routes() {
        let ignored = classify_with(Some("A & B"), &["a"], false);
        assert_eq!(resolve_route(&Decision::NoArtist, UPDATE), Route::Stay);
        assert_eq!(resolve_route(&Decision::SingleArtist, UPDATE), Route::Processed);
        assert_eq!(resolve_route(&ignored, UPDATE), Route::Ignored);
        assert_eq!(
            resolve_route(&ignored, RouteFlags { move_ignored: true, ..UPDATE }),
            Route::Processed
        );
    }

    #[test]
    fn file_record_paths() {
        let r = FileRecord::new(
            Path::new("album/01.mp3"),
            Path::new("in"),
            Path::new("out"),
            Path::new("ign"),
        );
        assert_eq!(r.input, PathBuf::from("in/album/01.mp3"));
        assert_eq!(r.output, PathBuf::from("out/album/01.mp3"));
        assert_eq!(r.ignored, PathBuf::from("ign/album/01.mp3"));
    }

    #[test]
    fn relocate_moves_and_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let r = FileRecord::new(
            Path::new("a/b/track.mp3"),
            &root.join("in"),
            &root.join("out"),
            &root.join("ign"),
        );
        std::fs::create_dir_all(r.input.parent().unwrap()).unwrap();
        std::fs::write(&r.input, b"x").unwrap();

        assert_eq!(relocate(&r, Route::Stay).unwrap(), None);
        assert!(r.input.exists());

        let moved = relocate(&r, Route::Ignored).unwrap();
        assert_eq!(moved.as_deref(), Some(r.ignored.as_path()));
        assert!(!r.input.exists());
        assert!(r.ignored.exists());
        assert!(!r.output.exists());
    }

    #[test]
    fn relocate_refuses_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let r = FileRecord::new(
            Path::new("t.mp3"),
            &root.join("in"),
            &root.join("out"),
            &root.join("ign"),
        );
        std::fs::create_dir_all(root.join("in")).unwrap();
        std::fs::create_dir_all(root.join("out")).unwrap();
        std::fs::write(&r.input, b"new").unwrap();
        std::fs::write(&r.output, b"old").unwrap();

        assert!(check_destination(&r, Route::Stay).is_ok());
        assert!(check_destination(&r, Route::Ignored).is_ok());
        let err = check_destination(&r, Route::Processed).unwrap_err();
        assert!(matches!(err, RunError::DestinationExists(_)));

        let err = relocate(&r, Route::Processed).unwrap_err();
        assert!(matches!(err, RunError::DestinationExists(_)));
        assert!(r.input.exists());
        assert_eq!(std::fs::read(&r.output).unwrap(), b"old");
    }

    #[test]
    fn relocate_missing_source_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let r = FileRecord::new(
            Path::new("gone.mp3"),
            &root.join("in"),
            &root.join("out"),
            &root.join("ign"),
        );
        let err = relocate(&r, Route::Processed).unwrap_err();
        assert!(matches!(err, RunError::Io { .. }));
    }
}
