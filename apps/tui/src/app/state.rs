use crate::anim::{self, Ease, Keyframes, Spring};
use crate::api::models::CatalogItem;
use crate::api::ApiError;
use crate::app::actions::AppActions;
use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::config::debug_enabled;
use rand::Rng;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;

/// Outcome of one catalog load, delivered from a spawned fetch task.
pub type LoadOutcome = Result<Vec<CatalogItem>, ApiError>;

/// Ambient counter wraps at a full turn and drives the blinking/sweeping
/// decorations; gesture springs run on their own clocks.
const FULL_ROTATION: f64 = 2.0 * std::f64::consts::PI;

/// Wall-clock gaps (suspend, debugger) are clamped so one frame never jumps
/// the decorations.
const MAX_FRAME_DELTA: f64 = 0.25;

/// The shuffle wiggle plays this long before the reload is issued.
pub const SHUFFLE_RELOAD_DELAY: Duration = Duration::from_millis(400);

/// How long one wiggle pass across the grid lasts.
pub const WIGGLE_DURATION: Duration = Duration::from_millis(450);

const PULSE_DURATION: Duration = Duration::from_millis(600);
const PULSE_LOOPS: u32 = 2;

const FILMS_SHUFFLE_SPAN: u32 = 10;
const CREATURES_SHUFFLE_SPAN: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
}

/// The three controls reachable with Tab / arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Random,
    Pulse,
    Shuffle,
}

impl Control {
    pub const ALL: [Self; 3] = [Self::Random, Self::Pulse, Self::Shuffle];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Random => "Random Item",
            Self::Pulse => "Pulse",
            Self::Shuffle => "Shuffle",
        }
    }
}

/// Glow spring for one control, grown while the control holds focus.
///
/// `engaged` is the last-writer-wins guard: when focus moves on while the
/// grow transition is still in flight, the released control's spring is
/// redirected and the stale grow no longer reaches the screen.
#[derive(Debug)]
pub struct ControlGlow {
    pub spring: Spring,
    pub engaged: bool,
}

impl ControlGlow {
    pub const REST_SCALE: f64 = 1.0;
    pub const GROWN_SCALE: f64 = 1.07;

    pub const fn new() -> Self {
        Self {
            spring: Spring::at_rest(Self::REST_SCALE, anim::FOCUS_RELEASE),
            engaged: false,
        }
    }

    pub fn engage(&mut self) {
        self.engaged = true;
        self.spring.retarget_with(Self::GROWN_SCALE, anim::FOCUS_GROW);
    }

    pub fn release(&mut self) {
        self.engaged = false;
        self.spring.retarget_with(Self::REST_SCALE, anim::FOCUS_RELEASE);
    }
}

/// Pulse keyframes currently playing against the hero panel.
#[derive(Debug)]
pub struct PulsePlayback {
    pub frames: Keyframes,
    pub started: Instant,
}

impl PulsePlayback {
    fn begin() -> Self {
        Self {
            frames: Keyframes::new(
                vec![1.0, 1.03, 1.0],
                PULSE_DURATION,
                Ease::InOutQuad,
                PULSE_LOOPS,
            ),
            started: Instant::now(),
        }
    }

    fn is_finished(&self) -> bool {
        self.frames.is_finished(self.started.elapsed())
    }

    fn value(&self) -> f64 {
        self.frames.sample(self.started.elapsed())
    }
}

/// Motion channels of the hero panel. The entrance springs start off-screen
/// and play exactly once; the scale channel is shared by the bounce gesture
/// and the pulse track, with the pulse winning while it plays.
#[derive(Debug)]
pub struct HeroMotion {
    pub offset: Spring,
    pub fade: Spring,
    pub scale: Spring,
    bounce_returning: bool,
    pub pulse: Option<PulsePlayback>,
}

impl HeroMotion {
    const ENTRANCE_ROWS: f64 = -8.0;
    const BOUNCE_SCALE: f64 = 1.03;

    fn new() -> Self {
        Self {
            offset: Spring::new(Self::ENTRANCE_ROWS, 0.0, anim::ENTRANCE_OFFSET),
            fade: Spring::new(0.0, 1.0, anim::ENTRANCE_FADE),
            scale: Spring::at_rest(1.0, anim::BOUNCE_BACK),
            bounce_returning: true,
            pulse: None,
        }
    }

    fn start_bounce(&mut self) {
        self.bounce_returning = false;
        self.scale.retarget_with(Self::BOUNCE_SCALE, anim::BOUNCE_UP);
    }

    fn start_pulse(&mut self) {
        self.pulse = Some(PulsePlayback::begin());
    }

    fn step(&mut self, dt: f64) {
        self.offset.step(dt);
        self.fade.step(dt);
        self.scale.step(dt);

        // Second leg of the bounce: once the up-spring settles, spring back.
        if !self.bounce_returning && self.scale.is_settled() {
            self.bounce_returning = true;
            self.scale.retarget_with(1.0, anim::BOUNCE_BACK);
        }

        if self.pulse.as_ref().is_some_and(PulsePlayback::is_finished) {
            self.pulse = None;
        }
    }

    /// Current scale of the hero panel, pulse track first, bounce spring
    /// otherwise.
    pub fn current_scale(&self) -> f64 {
        self.pulse
            .as_ref()
            .map_or_else(|| self.scale.value(), PulsePlayback::value)
    }
}

/// One shuffle wiggle pass across the card grid.
#[derive(Debug)]
pub struct Wiggle {
    pub started: Instant,
}

impl Wiggle {
    fn begin() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn is_finished(&self) -> bool {
        self.started.elapsed() >= WIGGLE_DURATION
    }
}

/// A reload requested by an input handler, picked up by the event loop.
#[derive(Debug, Clone, Copy)]
pub struct PendingReload {
    pub offset: u32,
    pub delay: Option<Duration>,
}

pub struct App {
    pub running: bool,
    pub status_message: String,
    pub catalog: Vec<CatalogItem>,
    pub hero: Option<CatalogItem>,
    pub load_state: LoadState,
    pub pending_reload: Option<PendingReload>,
    pub focus_index: usize,
    pub glows: Vec<ControlGlow>,
    pub hero_motion: HeroMotion,
    pub wiggle: Option<Wiggle>,
    pub grid_scroll: usize,
    pub animation_counter: f64,
    pub animation_paused: bool,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub show_help: bool,
    pub throbber: Mutex<ThrobberState>,
    pub grid_fx: Mutex<Option<Effect>>,
    pub last_loaded_at: Option<chrono::DateTime<chrono::Local>>,
    pub actions: AppActions,
}

impl App {
    pub fn new() -> Self {
        let mut glows: Vec<ControlGlow> = Control::ALL.iter().map(|_| ControlGlow::new()).collect();
        glows[0].engage();

        Self {
            running: true,
            status_message: String::new(),
            catalog: Vec::new(),
            hero: None,
            load_state: LoadState::Idle,
            pending_reload: None,
            focus_index: 0,
            glows,
            hero_motion: HeroMotion::new(),
            wiggle: None,
            grid_scroll: 0,
            animation_counter: 0.0,
            animation_paused: false,
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            show_help: false,
            throbber: Mutex::new(ThrobberState::default()),
            grid_fx: Mutex::new(None),
            last_loaded_at: None,
            actions: AppActions::new(),
        }
    }

    pub fn initialize(&mut self) -> color_eyre::Result<()> {
        self.actions.initialize()
    }

    /// Advances every animation channel by the elapsed wall-clock time.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.last_tick = delta;

        let dt = delta.as_secs_f64().min(MAX_FRAME_DELTA);

        if !self.animation_paused {
            self.animation_counter = (self.animation_counter + dt * 2.0).rem_euclid(FULL_ROTATION);
        }

        self.hero_motion.step(dt);
        for glow in &mut self.glows {
            glow.spring.step(dt);
        }

        if self.wiggle.as_ref().is_some_and(Wiggle::is_finished) {
            self.wiggle = None;
        }

        if self.load_state == LoadState::Loading {
            if let Ok(mut throbber) = self.throbber.lock() {
                throbber.calc_next();
            }
        }
    }

    /// Single writer for the catalog collection and the status slot. Every
    /// load outcome, initial or re-triggered, lands here; results are applied
    /// in arrival order, so a slower earlier fetch that completes last wins
    /// the display. In-flight loads cannot be aborted.
    pub fn apply_load(&mut self, outcome: LoadOutcome) {
        self.load_state = LoadState::Idle;

        match outcome {
            Ok(items) => {
                self.status_message = format!(
                    "Loaded {} items from the {} catalog.",
                    items.len(),
                    self.actions.kind.as_str()
                );
                self.catalog = items;
                self.grid_scroll = 0;
                self.set_random_hero();
                self.last_loaded_at = Some(chrono::Local::now());

                if let Ok(mut guard) = self.grid_fx.lock() {
                    *guard = Some(fx::coalesce((500, Interpolation::SineOut)));
                }
            }
            Err(err) => {
                if debug_enabled() {
                    eprintln!("[DEBUG] catalog load error: {err:?}");
                }
                self.status_message = format!("Error: failed to load the catalog: {err}");
            }
        }
    }

    /// Re-selects the hero uniformly at random from the current collection.
    /// An empty collection clears the hero rather than keeping one from a
    /// discarded load.
    pub fn set_random_hero(&mut self) {
        let mut rng = rand::thread_rng();
        self.hero = pick_random(&self.catalog, &mut rng).cloned();
    }

    pub fn focus_next(&mut self) {
        self.glows[self.focus_index].release();
        self.focus_index = wrap_increment(self.focus_index, Control::ALL.len());
        self.glows[self.focus_index].engage();
    }

    pub fn focus_prev(&mut self) {
        self.glows[self.focus_index].release();
        self.focus_index = wrap_decrement(self.focus_index, Control::ALL.len());
        self.glows[self.focus_index].engage();
    }

    pub const fn focused_control(&self) -> Control {
        Control::ALL[self.focus_index]
    }

    pub fn activate_focused(&mut self) {
        match self.focused_control() {
            Control::Random => self.trigger_random(),
            Control::Pulse => self.trigger_pulse(),
            Control::Shuffle => self.trigger_shuffle(),
        }
    }

    /// Random re-selection plus the small hero bounce.
    pub fn trigger_random(&mut self) {
        self.set_random_hero();
        self.hero_motion.start_bounce();
    }

    /// Fixed keyframe pulse against the hero panel; independent of data
    /// state.
    pub fn trigger_pulse(&mut self) {
        self.hero_motion.start_pulse();
    }

    /// Starts the card wiggle and requests a delayed reload at a freshly
    /// randomized offset. The event loop spawns the fetch once the request
    /// is picked up.
    pub fn trigger_shuffle(&mut self) {
        let mut rng = rand::thread_rng();
        let offset = self.random_shuffle_offset(&mut rng);

        self.wiggle = Some(Wiggle::begin());
        self.pending_reload = Some(PendingReload {
            offset,
            delay: Some(SHUFFLE_RELOAD_DELAY),
        });
        self.status_message = format!("Shuffling the {} catalog...", self.actions.kind.as_str());
    }

    /// Switches between the two catalogs and reloads from the start.
    pub fn switch_catalog(&mut self) {
        self.actions.kind = self.actions.kind.toggled();
        self.actions.offset = 0;
        self.pending_reload = Some(PendingReload {
            offset: 0,
            delay: None,
        });
        self.status_message = format!(
            "Switched to the {} catalog.",
            self.actions.kind.as_str()
        );
    }

    pub fn random_shuffle_offset<R: Rng>(&self, rng: &mut R) -> u32 {
        let span = match self.actions.kind {
            crate::domain::CatalogKind::Films => FILMS_SHUFFLE_SPAN,
            crate::domain::CatalogKind::Creatures => CREATURES_SHUFFLE_SPAN,
        };
        rng.gen_range(0..=span)
    }

    pub fn scroll_grid_up(&mut self) {
        self.grid_scroll = self.grid_scroll.saturating_sub(1);
    }

    pub fn scroll_grid_down(&mut self) {
        self.grid_scroll = self.grid_scroll.saturating_add(1).min(self.catalog.len());
    }
}

/// Uniform random pick from a slice; `None` when it is empty.
pub fn pick_random<'a, R: Rng>(items: &'a [CatalogItem], rng: &mut R) -> Option<&'a CatalogItem> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}
