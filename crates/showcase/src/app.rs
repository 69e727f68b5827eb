use crate::catalog::{Catalog, StoreItem};
use crate::config::{self, CarouselName, CarouselSettings, Config};
use crate::events::{AppEvent, Control, MountId};
use crate::view;
use async_channel::Sender;
use carousel::{
    AutoAdvanceTimer, Carousel, CarouselAction, ItemCache, JsonFileSource, LoadTask, PauseEdge,
    Point, SourceKey,
};
use std::path::Path;
use tokio::time::Instant;

/// Carousels reading the same file share one cache entry.
fn source_key(path: &Path) -> SourceKey {
    SourceKey::new(path.display().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A carousel together with the resources tied to its lifetime.
struct Mounted {
    id: MountId,
    settings: CarouselSettings,
    carousel: Carousel<StoreItem>,
    timer: AutoAdvanceTimer<AppEvent>,
    load: Option<LoadTask>,
    transition_started: Option<Instant>,
    dirty: bool,
}

impl Mounted {
    fn apply(&mut self, action: CarouselAction, now: Instant) {
        if let Some(edge) = action.pause {
            self.timer.set_paused(edge == PauseEdge::Paused);
        }
        if action.started.is_some() {
            self.transition_started = Some(now);
        }
        self.dirty |= action.should_redraw;
    }

    fn control(&mut self, control: Control, now: Instant) {
        let action = match control {
            Control::Next => self.carousel.next(),
            Control::Prev => self.carousel.prev(),
            Control::Jump(index) => self.carousel.jump_to(index),
            Control::Arrow(arrow) => self.carousel.arrow(arrow),
            Control::Hover(inside) => self.carousel.hover(inside),
            Control::Focus(focused) => self.carousel.focus(focused),
            Control::Swipe { dx, dy } => return self.swipe(Point::new(dx, dy), now),
        };
        self.apply(action, now);
    }

    /// Replays a reported swipe as press, move and release so the timer sees
    /// the touch pause and the resume as separate edges.
    fn swipe(&mut self, release: Point, now: Instant) {
        let pressed = self.carousel.touch_start(Point::default());
        self.apply(pressed, now);
        self.carousel.touch_move(release);
        let released = self.carousel.touch_end(Some(release));
        self.apply(released, now);
    }

    fn frame(&mut self, now: Instant) {
        if let Some(started) = self.transition_started
            && now.saturating_duration_since(started) >= self.settings.transition()
        {
            self.transition_started = None;
            let action = self.carousel.complete_transition();
            self.apply(action, now);
        }

        let action = self.carousel.on_frame();
        self.apply(action, now);
    }

    fn unmount(&mut self) {
        self.timer.unmount();
        if let Some(load) = self.load.take() {
            load.abort();
        }
        log::debug!("Unmounted carousel '{}'", self.settings.name);
    }
}

pub struct App {
    config: Config,
    catalog: Catalog,
    cache: ItemCache<StoreItem>,
    tx: Sender<AppEvent>,
    mounts: Vec<Mounted>,
    next_id: u64,
}

impl App {
    /// Must be called inside a tokio runtime: mounting starts timers and loads.
    pub fn new(
        config: Config,
        catalog: Catalog,
        cache: ItemCache<StoreItem>,
        tx: Sender<AppEvent>,
    ) -> Self {
        let mut app = Self {
            config,
            catalog,
            cache,
            tx,
            mounts: Vec::new(),
            next_id: 0,
        };
        app.mount_all();
        app
    }

    pub fn carousel(&self, name: &CarouselName) -> Option<&Carousel<StoreItem>> {
        self.find(name).map(|m| &m.carousel)
    }

    pub fn update(&mut self, event: AppEvent, now: Instant) -> Flow {
        match event {
            AppEvent::Control(name, control) => match self.find_mut(&name) {
                Some(mounted) => mounted.control(control, now),
                None => log::warn!("No carousel named '{}'", name),
            },
            AppEvent::AutoAdvance(id) => {
                if let Some(mounted) = self.by_id(id) {
                    mounted.carousel.tick();
                }
            }
            AppEvent::Loaded(id, items) => {
                if let Some(mounted) = self.by_id(id) {
                    log::info!(
                        "Carousel '{}' loaded {} items",
                        mounted.settings.name,
                        items.len()
                    );
                    mounted.load = None;
                    mounted.transition_started = None;
                    let action = mounted.carousel.replace_items(items);
                    mounted.apply(action, now);
                }
            }
            AppEvent::Show => {
                for mounted in &mut self.mounts {
                    mounted.dirty = true;
                }
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.reload(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppEvent::Quit => {
                self.unmount_all();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Frame boundary: finishes due transitions, applies deferred auto-advances
    /// and returns the lines of every carousel that changed.
    pub fn frame(&mut self, now: Instant) -> Vec<String> {
        self.mounts
            .iter_mut()
            .filter_map(|mounted| {
                mounted.frame(now);
                std::mem::take(&mut mounted.dirty)
                    .then(|| view::render(&mounted.settings.name, &mounted.carousel.view()))
            })
            .collect()
    }

    /// Tears every carousel down and mounts the new set from scratch. Cached
    /// items survive for sources the new config still reads.
    pub fn reload(&mut self, config: Config) {
        self.unmount_all();
        for old in self.config.carousels.iter().filter_map(|s| s.source.as_ref()) {
            let still_used = config
                .carousels
                .iter()
                .any(|s| s.source.as_ref() == Some(old));
            if !still_used && self.cache.invalidate(&source_key(old)) {
                log::debug!("Dropped cached items for {}", old.display());
            }
        }
        self.config = config;
        self.mount_all();
    }

    fn mount_all(&mut self) {
        let settings = self.config.carousels.clone();
        let mounts: Vec<Mounted> = settings.into_iter().map(|s| self.mount(s)).collect();
        self.mounts = mounts;
    }

    fn unmount_all(&mut self) {
        for mut mounted in self.mounts.drain(..) {
            mounted.unmount();
        }
    }

    fn mount(&mut self, settings: CarouselSettings) -> Mounted {
        let id = MountId(self.next_id);
        self.next_id += 1;

        let options = settings.options(self.config.direction);
        let fallback = self.catalog.fallback_for(&settings.name);

        let (items, load) = match &settings.source {
            Some(path) => {
                let source = JsonFileSource::new(source_key(path), path);
                let task = LoadTask::spawn(
                    source,
                    fallback,
                    self.cache.clone(),
                    self.tx.clone(),
                    move |items| AppEvent::Loaded(id, items),
                );
                (Vec::new(), Some(task))
            }
            None => (fallback, None),
        };

        let mut timer =
            AutoAdvanceTimer::new(settings.interval(), self.tx.clone(), AppEvent::AutoAdvance(id));
        timer.mount();

        log::info!(
            "Mounted carousel '{}' ({} items, every {:?}, {})",
            settings.name,
            items.len(),
            settings.interval(),
            options.direction
        );

        Mounted {
            id,
            carousel: Carousel::new(items, options),
            settings,
            timer,
            load,
            transition_started: None,
            dirty: true,
        }
    }

    fn find(&self, name: &CarouselName) -> Option<&Mounted> {
        self.mounts.iter().find(|m| &m.settings.name == name)
    }

    fn find_mut(&mut self, name: &CarouselName) -> Option<&mut Mounted> {
        self.mounts.iter_mut().find(|m| &m.settings.name == name)
    }

    fn by_id(&mut self, id: MountId) -> Option<&mut Mounted> {
        let found = self.mounts.iter_mut().find(|m| m.id == id);
        if found.is_none() {
            log::debug!("Dropping message for unmounted carousel {:?}", id);
        }
        found
    }
}
