//=========================================================================
// Audio
//=========================================================================
//
// Playback facade over the audio host.
//
//   play   reload if restarting a one-shot, then play with settings
//   stop   pause + rewind
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::host::{AudioHost, Playback};
use crate::core::resources::SoundHandle;

//=== MIME Detection ======================================================

/// MIME type the host is asked about for `path`, e.g. `audio/ogg`.
///
/// `None` when the path has no extension.
pub fn mime_for(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!("audio/{}", ext.to_ascii_lowercase()))
}

//=== Playback ============================================================

/// Starts `sound` with the given settings.
///
/// A one-shot sound that is already playing restarts from the beginning.
pub fn play<H: AudioHost + ?Sized>(host: &mut H, sound: &SoundHandle, playback: Playback) {
    let id = sound.id();

    if !playback.looping && !host.is_paused(id) {
        debug!(target: "momo::audio", "Restarting {:?}", id);
        host.reload(id);
    }

    debug!(target: "momo::audio", "Play {:?} {:?}", id, playback);
    host.play(id, playback);
}

/// Pauses `sound` and rewinds it to the start.
pub fn stop<H: AudioHost + ?Sized>(host: &mut H, sound: &SoundHandle) {
    host.pause(sound.id());
    host.rewind(sound.id());
}

pub fn pause<H: AudioHost + ?Sized>(host: &mut H, sound: &SoundHandle) {
    host.pause(sound.id());
}

pub fn resume<H: AudioHost + ?Sized>(host: &mut H, sound: &SoundHandle) {
    host.resume(sound.id());
}

pub fn is_paused<H: AudioHost + ?Sized>(host: &H, sound: &SoundHandle) -> bool {
    host.is_paused(sound.id())
}

pub fn is_playing<H: AudioHost + ?Sized>(host: &H, sound: &SoundHandle) -> bool {
    !host.is_paused(sound.id())
}

//=========================================================================
// Unit Tests
//=========================================================================
