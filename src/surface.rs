//! Rendering seams. The DOM implementations live in [`crate::dom`]; the
//! in-memory ones here record what would have been rendered so the card can
//! run headless.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::hearts::Heart;

/// The text region the message cycler fades in and out.
pub trait MessageRegion {
    fn set_opacity(&self, opacity: f64);
    fn set_text(&self, text: &str);
}

/// The surface falling hearts are attached to.
pub trait HeartLayer {
    /// Identifies one attached heart so it can be removed later.
    type Handle: 'static;

    fn attach(&self, heart: &Heart) -> Result<Self::Handle>;
    fn detach(&self, handle: &Self::Handle);
}

// --- Headless ---------------------------------------------------------------

/// One write to a [`MemoryRegion`], in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionWrite {
    Opacity(f64),
    Text(String),
}

#[derive(Debug, Clone)]
struct RegionState {
    opacity: f64,
    text: String,
    writes: Vec<RegionWrite>,
}

/// Records opacity and text writes. Starts fully opaque and empty, like a
/// freshly loaded page.
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    state: Rc<RefCell<RegionState>>,
}

impl Default for MemoryRegion {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(RegionState {
                opacity: 1.0,
                text: String::new(),
                writes: Vec::new(),
            })),
        }
    }
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(&self) -> f64 {
        self.state.borrow().opacity
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn writes(&self) -> Vec<RegionWrite> {
        self.state.borrow().writes.clone()
    }

    /// Every text the region displayed, oldest first.
    pub fn shown_texts(&self) -> Vec<String> {
        self.state
            .borrow()
            .writes
            .iter()
            .filter_map(|w| match w {
                RegionWrite::Text(t) => Some(t.clone()),
                RegionWrite::Opacity(_) => None,
            })
            .collect()
    }
}

impl MessageRegion for MemoryRegion {
    fn set_opacity(&self, opacity: f64) {
        let mut st = self.state.borrow_mut();
        st.opacity = opacity;
        st.writes.push(RegionWrite::Opacity(opacity));
    }

    fn set_text(&self, text: &str) {
        let mut st = self.state.borrow_mut();
        st.text = text.to_string();
        st.writes.push(RegionWrite::Text(text.to_string()));
    }
}

#[derive(Debug, Default)]
struct LayerState {
    next_id: u64,
    live: Vec<(u64, Heart)>,
    attached_total: u64,
    detached_total: u64,
}

/// Keeps attached hearts in a list keyed by a monotonically increasing id.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayer {
    state: Rc<RefCell<LayerState>>,
}

impl MemoryLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Ids of attached hearts, oldest first.
    pub fn live_ids(&self) -> Vec<u64> {
        self.state.borrow().live.iter().map(|(id, _)| *id).collect()
    }

    pub fn live_hearts(&self) -> Vec<Heart> {
        self.state.borrow().live.iter().map(|(_, h)| h.clone()).collect()
    }

    pub fn attached_total(&self) -> u64 {
        self.state.borrow().attached_total
    }

    pub fn detached_total(&self) -> u64 {
        self.state.borrow().detached_total
    }
}

impl HeartLayer for MemoryLayer {
    type Handle = u64;

    fn attach(&self, heart: &Heart) -> Result<u64> {
        let mut st = self.state.borrow_mut();
        let id = st.next_id;
        st.next_id += 1;
        st.attached_total += 1;
        st.live.push((id, heart.clone()));
        Ok(id)
    }

    fn detach(&self, handle: &u64) {
        let mut st = self.state.borrow_mut();
        let before = st.live.len();
        st.live.retain(|(id, _)| id != handle);
        if st.live.len() < before {
            st.detached_total += 1;
        }
    }
}
