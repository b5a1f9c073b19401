use crate::error::TagError;
use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use std::path::Path;

/// Reads and writes the artist field. The run driver only ever sees plain
/// strings; tag container formats stay behind this trait.
pub trait ArtistTags {
    fn read_artist(&self, path: &Path) -> Result<Option<String>, TagError>;
    fn write_artist(&self, path: &Path, artist: &str) -> Result<(), TagError>;
}

/// `ArtistTags` backed by lofty (ID3, Vorbis comments, MP4 ilst, APE...).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTags;

impl ArtistTags for LoftyTags {
    fn read_artist(&self, path: &Path) -> Result<Option<String>, TagError> {
        let tagged_file = lofty::read_from_path(path).map_err(|source| TagError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // Try primary tag, then fall back
        let artist = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .and_then(|tag| tag.artist().map(|a| a.to_string()));

        Ok(artist)
    }

    fn write_artist(&self, path: &Path, artist: &str) -> Result<(), TagError> {
        let mut tagged_file = Probe::open(path)
            .and_then(|probe| probe.read())
            .map_err(|source| TagError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        if tagged_file.primary_tag().is_none() && tagged_file.first_tag().is_none() {
            let tag_type = tagged_file.primary_tag_type();
            tagged_file.insert_tag(Tag::new(tag_type));
        }

        let tag = if tagged_file.primary_tag().is_some() {
            tagged_file.primary_tag_mut()
        } else {
            tagged_file.first_tag_mut()
        };
        let tag = tag.ok_or_else(|| TagError::NoTag {
            path: path.to_path_buf(),
        })?;
        tag.set_artist(artist.to_string());

        tagged_file
            .save_to_path(path, WriteOptions::default())
            .map_err(|source| TagError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
