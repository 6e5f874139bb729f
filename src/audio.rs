//! Terminal sound: the win chime rings the terminal bell, everything else is
//! tracked as state so the screen can show what would be playing.

use crate::slot::{Audio, SoundHandle};
use std::collections::BTreeSet;
use std::io::Write;
use tracing::trace;

pub struct TerminalAudio<W: Write = std::io::Stdout> {
    out: W,
    sound: bool,
    music: bool,
    music_playing: bool,
    next_handle: u32,
    reels: BTreeSet<SoundHandle>,
    chimes: u64,
    clicks: u64,
}

impl TerminalAudio<std::io::Stdout> {
    pub fn stdout(sound: bool, music: bool) -> Self {
        Self::new(std::io::stdout(), sound, music)
    }
}

impl<W: Write> TerminalAudio<W> {
    pub fn new(out: W, sound: bool, music: bool) -> Self {
        Self {
            out,
            sound,
            music,
            music_playing: false,
            next_handle: 0,
            reels: BTreeSet::new(),
            chimes: 0,
            clicks: 0,
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound
    }

    pub fn music_enabled(&self) -> bool {
        self.music
    }

    pub fn set_sound(&mut self, on: bool) {
        self.sound = on;
        if !on {
            self.reels.clear();
        }
    }

    /// Turning music off also stops it; turning it on waits for the next
    /// `play_music`.
    pub fn set_music(&mut self, on: bool) {
        self.music = on;
        if !on {
            self.music_playing = false;
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Reel sounds currently running.
    pub fn active_reels(&self) -> usize {
        self.reels.len()
    }

    pub fn chimes(&self) -> u64 {
        self.chimes
    }

    /// Key clicks played so far. A click makes no terminal output.
    pub fn clicks(&self) -> u64 {
        self.clicks
    }
}

impl<W: Write> Audio for TerminalAudio<W> {
    fn play_reel_sound(&mut self) -> Option<SoundHandle> {
        if !self.sound {
            return None;
        }
        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = SoundHandle(self.next_handle);
        self.reels.insert(handle);
        Some(handle)
    }

    fn halt_sound(&mut self, handle: SoundHandle) {
        self.reels.remove(&handle);
    }

    fn play_win_chime(&mut self) {
        if !self.sound {
            return;
        }
        self.chimes += 1;
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            trace!(error = %err, "bell failed");
        }
    }

    fn play_click(&mut self) {
        if self.sound {
            self.clicks += 1;
        }
    }

    fn play_music(&mut self) {
        if self.music {
            self.music_playing = true;
        }
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }
}
