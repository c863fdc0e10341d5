//! Quiz Arcade entry point
//!
//! Mounts the game picked by `?game=`, wires browser input and clocks to it
//! and runs the frame loop. Natively it runs a short headless session per game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, EventTarget, HtmlCanvasElement, KeyboardEvent, Window};

    use quiz_arcade::consts::COUNTDOWN_PERIOD_MS;
    use quiz_arcade::platform::{
        CountdownBinding, IntervalHost, Lifecycle, key_from_event_key, query_param,
        should_prevent_default,
    };
    use quiz_arcade::renderer::{Palette, RenderState, Scene};
    use quiz_arcade::scheduler::Simulation;
    use quiz_arcade::sim::{CountdownId, Phase};
    use quiz_arcade::{AnySession, Difficulty, FrameScheduler, GameKind, RenderError, Settings};

    /// How long a banner stays up
    const BANNER_MS: f64 = 1500.0;
    const OPTION_BUTTONS: usize = 4;

    type IntervalHandle = (i32, Closure<dyn FnMut()>);

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_default()
    }

    /// `setInterval` driving the countdown
    struct IntervalClock {
        game: Weak<RefCell<Game>>,
    }

    impl IntervalHost for IntervalClock {
        type Handle = IntervalHandle;

        fn start(&mut self, id: CountdownId) -> Option<IntervalHandle> {
            let window = web_sys::window()?;
            let game = self.game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().on_countdown(id);
                }
            });
            let handle = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    COUNTDOWN_PERIOD_MS,
                )
                .ok()?;
            Some((handle, closure))
        }

        fn stop(&mut self, (handle, _closure): IntervalHandle) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    /// Mounted game and everything registered on its behalf
    struct Game {
        session: AnySession,
        scheduler: FrameScheduler,
        render_state: Option<RenderState>,
        clock: IntervalClock,
        countdown: CountdownBinding<IntervalHandle>,
        lifecycle: Lifecycle,
        settings: Settings,
        banner: Option<(String, f64)>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(session: AnySession, settings: Settings, this: Weak<RefCell<Game>>) -> Self {
            Self {
                session,
                scheduler: FrameScheduler::new(),
                render_state: None,
                clock: IntervalClock { game: this },
                countdown: CountdownBinding::new(),
                lifecycle: Lifecycle::new(),
                settings,
                banner: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One display refresh; false once the loop should stop
        fn frame(&mut self, time: f64) -> bool {
            let outcome = self
                .scheduler
                .frame(&mut self.session, self.render_state.as_mut(), time);
            if !outcome.reschedule() {
                return false;
            }
            self.track_fps(time);
            self.sync(time);
            self.update_hud(time);
            true
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60000.0 / (time - oldest)).round() as u32;
            }
        }

        /// Re-arm the countdown interval and surface new events
        fn sync(&mut self, now: f64) {
            let wanted = self.session.active_countdown();
            self.countdown.reconcile(&mut self.clock, wanted);
            for event in self.session.drain_events() {
                log::debug!("{:?}", event);
                if let Some(text) = event.banner() {
                    self.banner = Some((text, now + BANNER_MS));
                }
            }
        }

        fn on_countdown(&mut self, id: CountdownId) {
            let now = now();
            self.session.countdown_tick(id, now);
            self.sync(now);
            self.update_hud(now);
        }

        fn on_key_down(&mut self, event: &KeyboardEvent) {
            let now = now();
            let name = event.key();
            if let Some(key) = key_from_event_key(&name) {
                if should_prevent_default(key) {
                    event.prevent_default();
                }
                self.session.key_down(key, now);
            } else if name == "Enter" {
                self.start_or_restart();
            } else if let Some(index) = option_index(&name) {
                self.session.answer(index, now);
            }
            self.sync(now);
        }

        fn on_key_up(&mut self, event: &KeyboardEvent) {
            if let Some(key) = key_from_event_key(&event.key()) {
                self.session.key_up(key);
            }
        }

        fn start_or_restart(&mut self) {
            if self.session.phase() == Phase::GameOver {
                self.session.reset();
                self.scheduler.rewind();
            }
            self.session.start();
            self.sync(now());
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.session.pause() {
                log::info!("Auto-paused ({})", reason);
                self.sync(now());
            }
        }

        /// Cancel clocks, then detach listeners. Idempotent.
        fn teardown(&mut self) {
            if self.lifecycle.is_torn_down() {
                return;
            }
            self.scheduler.cancel();
            self.session.teardown();
            self.countdown.release(&mut self.clock);
            self.lifecycle.teardown();
            log::info!("{} unmounted", self.session.kind().title());
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, now: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let scene = self.session.capture();
            let hud = &scene.hud;

            set_text(&document, "title", hud.title);
            set_text(&document, "instructions", hud.instructions);
            set_text(&document, "hud-level", &hud.level.to_string());
            set_text(&document, "hud-score", &hud.score.to_string());
            set_text(&document, "hud-time", &hud.time_left.to_string());
            match hud.lives {
                Some(lives) => {
                    set_visible(&document, "hud-lives-item", true);
                    set_text(&document, "hud-lives", &lives.to_string());
                }
                None => set_visible(&document, "hud-lives-item", false),
            }
            set_visible(&document, "hud-fps-item", self.settings.show_fps);
            set_text(&document, "hud-fps", &self.fps.to_string());

            let show_prompt = self.settings.show_hints || hud.phase == Phase::Question;
            set_visible(&document, "prompt", show_prompt && hud.prompt.is_some());
            set_text(&document, "prompt", hud.prompt.as_deref().unwrap_or_default());
            for i in 0..OPTION_BUTTONS {
                let id = format!("option-{}", i);
                match hud.options.get(i) {
                    Some(option) => {
                        set_visible(&document, &id, true);
                        set_text(&document, &id, &format!("{}. {}", i + 1, option));
                    }
                    None => set_visible(&document, &id, false),
                }
            }

            set_visible(&document, "start-menu", hud.phase == Phase::Menu);
            set_visible(&document, "pause-menu", hud.phase == Phase::Paused);
            set_visible(&document, "game-over", hud.phase == Phase::GameOver);
            if hud.phase == Phase::GameOver {
                set_text(&document, "final-score", &hud.score.to_string());
                set_text(&document, "final-level", &hud.level.to_string());
                set_text(
                    &document,
                    "final-result",
                    if hud.won { "You won!" } else { "Game over" },
                );
            }

            if self.banner.as_ref().is_some_and(|(_, until)| *until <= now) {
                self.banner = None;
            }
            match &self.banner {
                Some((text, _)) => {
                    set_visible(&document, "banner", true);
                    set_text(&document, "banner", text);
                }
                None => set_visible(&document, "banner", false),
            }

            render_labels(&document, &scene);
        }
    }

    /// `"1"`..`"4"` pick an option at the question prompt
    fn option_index(key: &str) -> Option<usize> {
        key.parse::<usize>()
            .ok()
            .filter(|n| (1..=OPTION_BUTTONS).contains(n))
            .map(|n| n - 1)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id)
            && el.text_content().as_deref() != Some(text)
        {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Labels are positioned over the canvas as a percentage of the playfield
    fn render_labels(document: &Document, scene: &Scene) {
        let Some(layer) = document.get_element_by_id("labels") else {
            return;
        };
        let field = scene.playfield.size();
        let html: String = scene
            .labels
            .iter()
            .map(|label| {
                let at = (label.center - scene.playfield.min) / field * 100.0;
                format!(
                    "<span class=\"label{}\" style=\"left:{:.2}%;top:{:.2}%;font-size:{}px\">{}</span>",
                    if label.dark { " dark" } else { "" },
                    at.x,
                    at.y,
                    label.size,
                    escape(&label.text)
                )
            })
            .collect();
        if layer.inner_html() != html {
            layer.set_inner_html(&html);
        }
    }

    /// Attach `handler`; its removal is registered with the lifecycle
    fn listen(
        lifecycle: &mut Lifecycle,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for {}", event);
            return;
        }
        let target = target.clone();
        lifecycle.on_listener(move || {
            let _ =
                target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        });
    }

    /// Run `f` against the game if it is still mounted
    fn with_game(game: &Weak<RefCell<Game>>, f: impl FnOnce(&mut Game)) {
        if let Some(game) = game.upgrade() {
            f(&mut game.borrow_mut());
        }
    }

    fn canvas_size(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        (
            (canvas.client_width() as f64 * dpr) as u32,
            (canvas.client_height() as f64 * dpr) as u32,
        )
    }

    async fn init_renderer(
        window: &Window,
        canvas: HtmlCanvasElement,
        palette: Palette,
    ) -> Result<RenderState, RenderError> {
        let (width, height) = canvas_size(window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width.max(1), height.max(1), palette).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let search = window.location().search().unwrap_or_default();
        let kind = GameKind::from_query(&search).unwrap_or(GameKind::DateShooter);
        let mut settings = Settings::load();
        if let Some(difficulty) = query_param(&search, "difficulty").and_then(Difficulty::from_str)
            && difficulty != settings.difficulty
        {
            settings.difficulty = difficulty;
            settings.save();
        }

        let seed = js_sys::Date::now() as u64;
        let session = AnySession::new(kind, &settings, seed);
        let palette = Palette::from_settings(settings.high_contrast);
        let game = Rc::new_cyclic(|this| RefCell::new(Game::new(session, settings, this.clone())));
        log::info!("{} mounted with seed {}", kind.title(), seed);

        let canvas = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        match canvas.clone() {
            Some(canvas) => match init_renderer(&window, canvas, palette).await {
                Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                Err(e) => log::error!("Renderer unavailable: {}", e),
            },
            None => log::warn!("No canvas element; frames will be skipped"),
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let running = Rc::new(Cell::new(true));
        {
            let weak = Rc::downgrade(&game);
            let mut g = game.borrow_mut();
            let stop = running.clone();
            g.lifecycle.on_clock(move || stop.set(false));
            setup_input_handlers(&mut g.lifecycle, &window, &weak);
            setup_buttons(&mut g.lifecycle, &document, &weak);
            setup_auto_pause(&mut g.lifecycle, &window, &document, &weak);
            if let Some(canvas) = canvas {
                setup_resize(&mut g.lifecycle, &window, canvas, &weak);
            }
            g.update_hud(now());
        }

        request_animation_frame(game, running);
    }

    fn setup_input_handlers(lifecycle: &mut Lifecycle, window: &Window, game: &Weak<RefCell<Game>>) {
        let weak = game.clone();
        listen(lifecycle, window, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                with_game(&weak, |g| g.on_key_down(event));
            }
        });
        let weak = game.clone();
        listen(lifecycle, window, "keyup", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                with_game(&weak, |g| g.on_key_up(event));
            }
        });
    }

    fn setup_buttons(lifecycle: &mut Lifecycle, document: &Document, game: &Weak<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let weak = game.clone();
                listen(lifecycle, &btn, "click", move |_| {
                    with_game(&weak, |g| g.start_or_restart());
                });
            }
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let weak = game.clone();
            listen(lifecycle, &btn, "click", move |_| {
                with_game(&weak, |g| {
                    g.session.toggle_pause();
                    g.sync(now());
                });
            });
        }

        for i in 0..OPTION_BUTTONS {
            if let Some(btn) = document.get_element_by_id(&format!("option-{}", i)) {
                let weak = game.clone();
                listen(lifecycle, &btn, "click", move |_| {
                    with_game(&weak, |g| {
                        let now = now();
                        g.session.answer(i, now);
                        g.sync(now);
                    });
                });
            }
        }

        if let Some(btn) = document.get_element_by_id("back-btn") {
            let weak = game.clone();
            listen(lifecycle, &btn, "click", move |_| {
                with_game(&weak, |g| g.teardown());
                if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                    let _ = history.back();
                }
            });
        }
    }

    fn setup_auto_pause(
        lifecycle: &mut Lifecycle,
        window: &Window,
        document: &Document,
        game: &Weak<RefCell<Game>>,
    ) {
        // Visibility change (tab switch, minimize)
        let weak = game.clone();
        let doc = document.clone();
        listen(lifecycle, document, "visibilitychange", move |_| {
            if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                with_game(&weak, |g| g.auto_pause("tab hidden"));
            }
        });

        // Window blur (click outside)
        let weak = game.clone();
        listen(lifecycle, window, "blur", move |_| {
            with_game(&weak, |g| g.auto_pause("window blur"));
        });

        // Leaving the page
        let weak = game.clone();
        listen(lifecycle, window, "pagehide", move |_| {
            with_game(&weak, |g| g.teardown());
        });
    }

    fn setup_resize(
        lifecycle: &mut Lifecycle,
        window: &Window,
        canvas: HtmlCanvasElement,
        game: &Weak<RefCell<Game>>,
    ) {
        let weak = game.clone();
        listen(lifecycle, window, "resize", move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            with_game(&weak, |g| {
                if let Some(render_state) = g.render_state.as_mut() {
                    render_state.resize(width, height);
                }
            });
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, running, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>, time: f64) {
        if !running.get() {
            return;
        }
        let keep_going = game.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(game, running);
        } else {
            log::debug!("Frame loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Quiz Arcade (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    let kinds = match std::env::args().nth(1) {
        Some(arg) => match quiz_arcade::GameKind::from_str(&arg) {
            Some(kind) => vec![kind],
            None => {
                log::error!("Unknown game '{}' (history, math, survival)", arg);
                return;
            }
        },
        None => quiz_arcade::GameKind::ALL.to_vec(),
    };
    for kind in kinds {
        headless::run(kind, 42);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use quiz_arcade::renderer::NullSurface;
    use quiz_arcade::sim::{CountdownId, Key, Phase};
    use quiz_arcade::{AnySession, FrameScheduler, GameKind, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ninety seconds of 60Hz frames
    const MAX_FRAMES: u32 = 60 * 90;

    /// Play `kind` with a simulated clock: fire twice a second and always
    /// pick the first option at a question prompt.
    pub fn run(kind: GameKind, seed: u64) {
        let mut session = AnySession::new(kind, &Settings::default(), seed);
        let mut scheduler = FrameScheduler::new();
        let mut surface = NullSurface::default();
        let mut armed: Option<(CountdownId, f64)> = None;
        let mut now = 0.0;

        session.start();
        for frame in 0..MAX_FRAMES {
            now += FRAME_MS;
            if frame % 30 == 0 {
                session.key_down(Key::Fire, now);
                session.key_up(Key::Fire);
            }
            if !scheduler.frame(&mut session, Some(&mut surface), now).reschedule() {
                break;
            }

            armed = match (session.active_countdown(), armed) {
                (Some(id), Some((armed_id, since))) if id == armed_id => {
                    if now - since >= 1000.0 {
                        session.countdown_tick(id, now);
                        Some((id, now))
                    } else {
                        Some((id, since))
                    }
                }
                (Some(id), _) => Some((id, now)),
                (None, _) => None,
            };

            if session.phase() == Phase::Question {
                session.answer(0, now);
            }
            for event in session.drain_events() {
                if let Some(banner) = event.banner() {
                    log::info!("[{}] {}", kind.as_str(), banner);
                }
            }
            if session.phase() == Phase::GameOver {
                break;
            }
        }

        log::info!(
            "[{}] finished: {} at level {}, score {}, {} frames",
            kind.as_str(),
            session.phase().as_str(),
            session.level(),
            session.score(),
            surface.frames
        );
        session.teardown();
    }
}
