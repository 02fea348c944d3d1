//! Sound output. Terminals only offer the bell, so each cue maps to a number
//! of BEL characters written to the terminal.

use slither::core::{AudioCue, GameEvent};
use std::io::{self, Write};

const BEL: &[u8] = b"\x07";

fn bell_count(cue: AudioCue) -> usize {
    match cue {
        AudioCue::Eat => 1,
        AudioCue::Collision => 1,
        AudioCue::LevelUp => 2,
    }
}

pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Ring for every cue in `events`. Nothing is written when sound is off.
    pub fn play(&mut self, events: &[GameEvent], sound_enabled: bool) -> io::Result<()> {
        if !sound_enabled {
            return Ok(());
        }
        let mut rang = false;
        for cue in events.iter().filter_map(GameEvent::audio_cue) {
            for _ in 0..bell_count(cue) {
                self.out.write_all(BEL)?;
            }
            rang = true;
        }
        if rang {
            self.out.flush()?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
