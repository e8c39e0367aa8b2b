//! Browser wiring: DOM-backed surfaces and the startup sequence.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

use crate::config::CardConfig;
use crate::cycler::{MessageCycler, MessageList};
use crate::error::{CardError, Result};
use crate::hearts::{Heart, HeartSpawner};
use crate::random::EntropySource;
use crate::schedule::BrowserScheduler;
use crate::surface::{HeartLayer, MessageRegion};

/// The message `<div>`; opacity goes through `style.opacity` so the
/// stylesheet's transition animates it.
#[derive(Clone, Debug)]
pub struct DomRegion {
    el: HtmlElement,
}

impl DomRegion {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }
}

impl MessageRegion for DomRegion {
    fn set_opacity(&self, opacity: f64) {
        if let Err(err) = self
            .el
            .style()
            .set_property("opacity", &opacity.to_string())
        {
            tracing::warn!("setting opacity failed: {:?}", err);
        }
    }

    fn set_text(&self, text: &str) {
        self.el.set_text_content(Some(text));
    }
}

/// Appends hearts to the document body as `<div class="heart">`.
#[derive(Clone, Debug)]
pub struct DomLayer {
    doc: Document,
    body: HtmlElement,
    class: String,
}

impl DomLayer {
    pub fn new(doc: Document, body: HtmlElement, class: impl Into<String>) -> Self {
        Self {
            doc,
            body,
            class: class.into(),
        }
    }
}

impl HeartLayer for DomLayer {
    type Handle = Element;

    fn attach(&self, heart: &Heart) -> Result<Element> {
        let div = self.doc.create_element("div")?;
        div.set_class_name(&self.class);
        div.set_attribute("style", &heart.inline_style())?;
        div.set_text_content(Some(&heart.glyph.to_string()));
        self.body.append_child(&div)?;
        Ok(div)
    }

    fn detach(&self, handle: &Element) {
        handle.remove();
    }
}

fn document() -> Result<Document> {
    let win = window().ok_or(CardError::NoWindow)?;
    win.document().ok_or(CardError::NoDocument)
}

/// Run `mount` now if the document has been parsed, otherwise on
/// `DOMContentLoaded`.
pub fn when_ready(config: CardConfig) -> Result<()> {
    let doc = document()?;
    if doc.ready_state() != "loading" {
        return mount(&doc, &config);
    }
    tracing::debug!("document still loading, deferring mount");
    let cb = Closure::once_into_js(move || {
        let mounted = document().and_then(|doc| mount(&doc, &config));
        if let Err(err) = mounted {
            tracing::warn!("card mount failed: {err}");
        }
    });
    doc.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())?;
    Ok(())
}

/// Start the heart spawner and bind the message button.
///
/// The spawner runs even if the message cycler cannot be bound; the cycler's
/// error is returned after the spawner is up.
pub fn mount(doc: &Document, config: &CardConfig) -> Result<()> {
    config.validate()?;
    start_hearts(doc, config)?;
    bind_cycler(doc, config)?;
    tracing::info!("heart card mounted");
    Ok(())
}

pub fn start_hearts(doc: &Document, config: &CardConfig) -> Result<()> {
    let body = doc.body().ok_or(CardError::NoBody)?;
    let layer = DomLayer::new(doc.clone(), body, config.hearts.class.clone());
    let spawner = Rc::new(HeartSpawner::new(
        layer,
        BrowserScheduler,
        EntropySource::new(),
        config.hearts.clone(),
    ));
    spawner.start()
}

/// Pair the activation control with its message region. No control means
/// `Ok(None)` and the region is never looked up; a control without a region
/// is `MissingElement`.
pub fn pair_controls<B, R>(
    button: Option<B>,
    find_region: impl FnOnce() -> Option<R>,
    region_id: &str,
) -> Result<Option<(B, R)>> {
    let Some(button) = button else {
        return Ok(None);
    };
    let region = find_region().ok_or_else(|| CardError::MissingElement(region_id.to_string()))?;
    Ok(Some((button, region)))
}

/// Register the click handler. A missing button skips registration silently;
/// a present button with no message region is an error.
pub fn bind_cycler(doc: &Document, config: &CardConfig) -> Result<bool> {
    let paired = pair_controls(
        doc.get_element_by_id(&config.button_id),
        || {
            doc.get_element_by_id(&config.region_id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        },
        &config.region_id,
    )?;
    let Some((button, region)) = paired else {
        tracing::debug!(id = %config.button_id, "no activation control, skipping");
        return Ok(false);
    };

    let messages = MessageList::new(config.messages.iter().cloned())?;
    let cycler = Rc::new(MessageCycler::new(
        messages,
        DomRegion::new(region),
        BrowserScheduler,
        config.fade_ms,
    ));

    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        if let Err(err) = cycler.activate() {
            tracing::warn!("message activation failed: {err}");
        }
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(true)
}
