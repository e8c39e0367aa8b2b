//! Falling hearts: one per tick, each removed a fixed time after it appears.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::HeartSettings;
use crate::error::Result;
use crate::random::RandomSource;
use crate::schedule::Scheduler;
use crate::surface::HeartLayer;

/// Presentation parameters of one falling heart.
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    /// Horizontal offset, percent of viewport width.
    pub left_vw: f64,
    /// Duration of the CSS `fall` animation in seconds.
    pub fall_secs: f64,
    pub glyph: char,
}

impl Heart {
    /// Inline style handed to the stylesheet's `fall` animation.
    pub fn inline_style(&self) -> String {
        format!(
            "left: {}vw; animation-duration: {}s;",
            self.left_vw, self.fall_secs
        )
    }
}

pub struct HeartSpawner<L: HeartLayer, S: Scheduler, G: RandomSource> {
    layer: Rc<L>,
    scheduler: S,
    rng: RefCell<G>,
    settings: HeartSettings,
}

impl<L, S, G> HeartSpawner<L, S, G>
where
    L: HeartLayer + 'static,
    S: Scheduler + 'static,
    G: RandomSource + 'static,
{
    pub fn new(layer: L, scheduler: S, rng: G, settings: HeartSettings) -> Self {
        Self {
            layer: Rc::new(layer),
            scheduler,
            rng: RefCell::new(rng),
            settings,
        }
    }

    pub fn settings(&self) -> &HeartSettings {
        &self.settings
    }

    /// Draw the next heart's position and fall duration.
    pub fn next_heart(&self) -> Heart {
        let mut rng = self.rng.borrow_mut();
        let (l0, l1) = self.settings.left_vw;
        let (f0, f1) = self.settings.fall_secs;
        let left_vw = rng.uniform(l0, l1);
        let fall_secs = rng.uniform(f0, f1);
        Heart {
            left_vw,
            fall_secs,
            glyph: self.settings.glyph,
        }
    }

    /// Spawn one heart and schedule its removal.
    pub fn tick(&self) -> Result<Heart> {
        let heart = self.next_heart();
        let handle = self.layer.attach(&heart)?;
        tracing::trace!(left_vw = heart.left_vw, fall_secs = heart.fall_secs, "heart spawned");
        let layer = Rc::clone(&self.layer);
        let remove = Rc::new(handle);
        let pending = Rc::clone(&remove);
        let scheduled = self.scheduler.after(
            self.settings.lifetime_ms,
            Box::new(move || layer.detach(&pending)),
        );
        if let Err(err) = scheduled {
            // No removal timer means nothing would ever take it down.
            self.layer.detach(&remove);
            return Err(err);
        }
        Ok(heart)
    }

    /// Tick every `spawn_period_ms` for the rest of the page's life.
    pub fn start(self: &Rc<Self>) -> Result<()> {
        let this = Rc::clone(self);
        self.scheduler.every(
            self.settings.spawn_period_ms,
            Box::new(move || {
                if let Err(err) = this.tick() {
                    tracing::warn!("heart spawn failed: {err}");
                }
            }),
        )?;
        tracing::debug!(
            period_ms = self.settings.spawn_period_ms,
            lifetime_ms = self.settings.lifetime_ms,
            "heart spawner started"
        );
        Ok(())
    }
}
