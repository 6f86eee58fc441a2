use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{
    audio::AudioContext,
    config::{PianoConfig, DEFAULT_STOP_DELAY},
    engine::Scheduler,
    keys::{
        registry::{KeyId, KeyRegistry},
        surface::{Surface, PRESSED},
    },
    synth::{
        factory::{ToneVoiceFactory, VoiceFactory},
        voice::VoiceHandle,
    },
};

/// Note lifecycle manager.
///
/// Tracks which keys are sounding, starts a voice per press, and stops it a
/// fixed delay after release. At most one voice per key is tracked; a key
/// released and pressed again inside the stop delay briefly has two voices
/// sounding, the first already untracked and fading out on its own.
pub struct Piano<S: Surface, F: VoiceFactory = ToneVoiceFactory> {
    surface: S,
    registry: KeyRegistry,
    factory: F,
    audio: AudioContext,
    active: HashMap<KeyId, VoiceHandle>,
    pending_stops: Scheduler<VoiceHandle>,
    stop_delay: Duration,
}

impl<S: Surface> Piano<S, ToneVoiceFactory> {
    /// Piano with the default bindings and the voice and timing of `config`.
    pub fn from_config(surface: S, audio: AudioContext, config: &PianoConfig) -> Self {
        Piano::new(surface, ToneVoiceFactory::from_config(config), audio)
            .with_stop_delay(config.stop_delay)
    }
}

impl<S: Surface, F: VoiceFactory> Piano<S, F> {
    /// Piano over the default key bindings, resolved against `surface`.
    pub fn new(surface: S, factory: F, audio: AudioContext) -> Self {
        let registry = KeyRegistry::build(&surface);
        Self::with_registry(surface, registry, factory, audio)
    }

    pub fn with_registry(surface: S, registry: KeyRegistry, factory: F, audio: AudioContext) -> Self {
        Self {
            surface,
            registry,
            factory,
            audio,
            active: HashMap::new(),
            pending_stops: Scheduler::new(),
            stop_delay: DEFAULT_STOP_DELAY,
        }
    }

    pub fn with_stop_delay(mut self, delay: Duration) -> Self {
        self.stop_delay = delay;
        self
    }

    /// Start a voice for `key`.
    ///
    /// Ignored when the key already has a voice (key repeat) or is not in
    /// the registry.
    pub fn press_on(&mut self, key: KeyId) {
        if self.active.contains_key(&key) {
            return;
        }
        let Some(entry) = self.registry.lookup(key) else {
            log::debug!("ignoring unregistered key {}", key.token());
            return;
        };

        let voice = self.factory.build(entry.pitch_hz, self.audio.current_time());
        if let Some(element) = entry.element {
            self.surface.add_class(element, PRESSED);
        }
        let handle = voice.start(&mut self.audio);
        log::debug!(
            "note on {} ({} at {:.2} Hz), voice {}",
            key.token(),
            entry.note,
            entry.pitch_hz,
            handle.id()
        );
        self.active.insert(key, handle);
    }

    /// Release `key` at `now`.
    ///
    /// The pressed marker is removed whether or not the key was sounding.
    /// A tracked voice leaves the map immediately and is stopped once the
    /// stop delay has passed, on a later [`Piano::poll`].
    pub fn press_off(&mut self, key: KeyId, now: Instant) {
        if let Some(element) = self.registry.lookup(key).and_then(|entry| entry.element) {
            self.surface.remove_class(element, PRESSED);
        }

        if let Some(handle) = self.active.remove(&key) {
            log::debug!("note off {}, voice {} stops in {:?}", key.token(), handle.id(), self.stop_delay);
            self.pending_stops.enqueue(now + self.stop_delay, handle);
        }
    }

    /// Release every sounding key.
    pub fn release_all(&mut self, now: Instant) {
        let keys: Vec<KeyId> = self.active.keys().copied().collect();
        for key in keys {
            self.press_off(key, now);
        }
    }

    /// Run the deferred stops due at or before `now`.
    ///
    /// A stop the audio queue cannot take yet stays pending and is retried
    /// on the next poll. Voices the mixer has let go of are freed here.
    pub fn poll(&mut self, now: Instant) {
        self.audio.collect_retired();

        let mut undelivered = Vec::new();
        while let Some(handle) = self.pending_stops.pop_due(now) {
            if handle.stop(&mut self.audio) {
                log::debug!("voice {} stopped", handle.id());
            } else {
                undelivered.push(handle);
            }
        }
        for handle in undelivered {
            self.pending_stops.enqueue(now, handle);
        }
    }

    /// Make sure the audio output is running.
    pub fn resume_audio(&mut self) {
        self.audio.resume();
    }

    /// Key drawn at terminal cell (`column`, `row`).
    pub fn key_at(&self, column: u16, row: u16) -> Option<KeyId> {
        let element = self.surface.element_at(column, row)?;
        self.registry.key_for_element(element)
    }

    pub fn active_voice(&self, key: KeyId) -> Option<&VoiceHandle> {
        self.active.get(&key)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn active_keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.active.keys().copied()
    }

    /// Stops scheduled but not yet run.
    pub fn pending_stops(&self) -> usize {
        self.pending_stops.len()
    }

    pub fn next_stop_due(&self) -> Option<Instant> {
        self.pending_stops.next_due()
    }

    /// Whether `key`'s element carries the pressed marker.
    pub fn is_pressed(&self, key: KeyId) -> bool {
        self.registry
            .lookup(key)
            .and_then(|entry| entry.element)
            .is_some_and(|element| self.surface.has_class(element, PRESSED))
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn audio(&self) -> &AudioContext {
        &self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::{mixer::Mixer, AudioContext},
        keys::{registry::DEFAULT_BINDINGS, surface::KeyboardSurface},
        synth::message::SynthMessage,
    };

    type TestMixer = Mixer<rtrb::Consumer<SynthMessage>>;

    fn piano() -> (Piano<KeyboardSurface>, TestMixer) {
        let (audio, mixer) = AudioContext::new(48_000.0, 64);
        (
            Piano::new(KeyboardSurface::piano(), ToneVoiceFactory::default(), audio),
            mixer,
        )
    }

    #[test]
    fn press_marks_key_and_tracks_voice() {
        let (mut piano, mut mixer) = piano();
        piano.press_on(KeyId::H);

        let voice = piano.active_voice(KeyId::H).expect("H is sounding");
        assert!((voice.frequency() - 440.0).abs() < 1e-3);
        assert!(piano.is_pressed(KeyId::H));

        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 1);
    }

    #[test]
    fn repeated_press_is_ignored() {
        let (mut piano, mut mixer) = piano();
        piano.press_on(KeyId::A);
        let first = *piano.active_voice(KeyId::A).unwrap();
        piano.press_on(KeyId::A);

        assert_eq!(piano.active_count(), 1);
        assert_eq!(piano.active_voice(KeyId::A), Some(&first));
        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 1);
    }

    #[test]
    fn unregistered_key_is_ignored() {
        let (audio, mut mixer) = AudioContext::new(48_000.0, 64);
        let surface = KeyboardSurface::piano();
        let registry = KeyRegistry::from_bindings(&surface, &DEFAULT_BINDINGS[..3]);
        let mut piano = Piano::with_registry(surface, registry, ToneVoiceFactory::default(), audio);

        piano.press_on(KeyId::H);
        piano.press_off(KeyId::H, Instant::now());

        assert_eq!(piano.active_count(), 0);
        assert_eq!(piano.pending_stops(), 0);
        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 0);
    }

    #[test]
    fn release_without_press_is_a_no_op() {
        let (mut piano, mut mixer) = piano();
        piano.press_off(KeyId::J, Instant::now());

        assert_eq!(piano.active_count(), 0);
        assert_eq!(piano.pending_stops(), 0);
        assert!(!piano.is_pressed(KeyId::J));
        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 0);
    }

    #[test]
    fn release_clears_marker_now_and_stops_voice_later() {
        let (mut piano, mut mixer) = piano();
        let t0 = Instant::now();
        piano.press_on(KeyId::D);
        piano.press_off(KeyId::D, t0);

        assert!(!piano.is_pressed(KeyId::D));
        assert!(piano.active_voice(KeyId::D).is_none());
        assert_eq!(piano.pending_stops(), 1);
        assert_eq!(piano.next_stop_due(), Some(t0 + Duration::from_secs(2)));

        piano.poll(t0 + Duration::from_millis(1_999));
        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 1);

        piano.poll(t0 + Duration::from_secs(2));
        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 0);
        assert_eq!(piano.pending_stops(), 0);
    }

    #[test]
    fn missing_element_still_plays() {
        let (audio, mut mixer) = AudioContext::new(48_000.0, 64);
        let mut piano = Piano::new(KeyboardSurface::new(), ToneVoiceFactory::default(), audio);

        piano.press_on(KeyId::S);
        assert!(piano.active_voice(KeyId::S).is_some());
        assert!(!piano.is_pressed(KeyId::S));
        piano.press_off(KeyId::S, Instant::now());
        assert_eq!(piano.pending_stops(), 1);
        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 1);
    }

    #[test]
    fn release_all_schedules_every_voice() {
        let (mut piano, _mixer) = piano();
        for key in [KeyId::A, KeyId::E, KeyId::G] {
            piano.press_on(key);
        }
        piano.release_all(Instant::now());
        assert_eq!(piano.active_count(), 0);
        assert_eq!(piano.pending_stops(), 3);
    }

    #[test]
    fn custom_stop_delay() {
        let (audio, mut mixer) = AudioContext::new(48_000.0, 64);
        let config = PianoConfig::new().stop_delay(Duration::from_millis(100));
        let mut piano = Piano::from_config(KeyboardSurface::piano(), audio, &config);

        let t0 = Instant::now();
        piano.press_on(KeyId::F);
        piano.press_off(KeyId::F, t0);
        piano.poll(t0 + Duration::from_millis(100));
        mixer.process_messages();
        assert_eq!(mixer.voice_count(), 0);
    }

    #[test]
    fn stop_survives_a_full_queue() {
        let (audio, mut mixer) = AudioContext::new(48_000.0, 1);
        let mut piano = Piano::new(KeyboardSurface::piano(), ToneVoiceFactory::default(), audio);
        let t0 = Instant::now();

        // the start fills the only slot, so the first stop cannot go out
        piano.press_on(KeyId::A);
        piano.press_off(KeyId::A, t0);
        piano.poll(t0 + Duration::from_secs(2));
        assert_eq!(piano.pending_stops(), 1);

        let mut out = vec![0.0f32; 64];
        for _ in 0..3 {
            mixer.render_block(&mut out);
            piano.poll(t0 + Duration::from_secs(3));
        }
        mixer.render_block(&mut out);

        assert_eq!(piano.pending_stops(), 0);
        assert_eq!(mixer.voice_count(), 0);
    }
}
