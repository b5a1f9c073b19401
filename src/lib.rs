pub mod changelog;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod fixtures;
pub mod grammar;
pub mod prune;
pub mod router;
pub mod scanner;
pub mod tokenizer;

/// Audio file extensions whose tags we can read and write
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "ogg", "opus", "spx", "wav",
    "aif", "aiff", "ape", "wv", "mpc", "m4a", "m4b", "aac",
];

/// Application name for XDG paths
pub const APP_NAME: &str = "credsplit";
