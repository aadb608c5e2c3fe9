//! Names accepted for synthesized audio files.
//!
//! The server checks request paths with this rule before reading from its
//! audio directory, and the client checks names returned by the server before
//! downloading or writing them locally.

const AUDIO_EXTENSION: &str = ".mp3";

/// A bare `.mp3` filename that cannot leave the directory it is joined to.
pub fn is_valid_audio_filename(filename: &str) -> bool {
    filename.len() > AUDIO_EXTENSION.len()
        && filename.ends_with(AUDIO_EXTENSION)
        && !filename.contains("..")
        && !filename.contains(['/', '\\', ':', '\0'])
}
