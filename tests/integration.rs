// Integration tests (native) for the `heart-card` crate.
// Both behaviors run headless on a virtual clock, so no browser is needed.

use std::rc::Rc;

use heart_card::{
    HeartSettings, HeartSpawner, MemoryLayer, MemoryRegion, MessageCycler, MessageList,
    RegionWrite, SequenceSource, VirtualScheduler,
};

fn cycler(
    messages: &[&str],
) -> (Rc<MessageCycler<MemoryRegion, VirtualScheduler>>, MemoryRegion, VirtualScheduler) {
    let region = MemoryRegion::new();
    let sched = VirtualScheduler::new();
    let c = Rc::new(MessageCycler::new(
        MessageList::new(messages.iter().copied()).unwrap(),
        region.clone(),
        sched.clone(),
        400,
    ));
    (c, region, sched)
}

fn spawner(
    rng: SequenceSource,
) -> (Rc<HeartSpawner<MemoryLayer, VirtualScheduler, SequenceSource>>, MemoryLayer, VirtualScheduler) {
    let layer = MemoryLayer::new();
    let sched = VirtualScheduler::new();
    let s = Rc::new(HeartSpawner::new(
        layer.clone(),
        sched.clone(),
        rng,
        HeartSettings::default(),
    ));
    (s, layer, sched)
}

#[test]
fn activations_500ms_apart_show_messages_in_order_and_wrap() {
    let (c, region, sched) = cycler(&["A", "B", "C"]);
    for n in 0..4u64 {
        sched.advance_to(n * 500);
        c.activate().unwrap();
    }
    sched.advance_to(2000);
    assert_eq!(region.shown_texts(), vec!["A", "B", "C", "A"]);
    assert_eq!(region.text(), "A");
    assert_eq!(region.opacity(), 1.0);
    assert_eq!(c.index(), 1);
}

#[test]
fn fade_out_is_immediate_and_reveal_waits_400ms() {
    let (c, region, sched) = cycler(&["A", "B"]);
    c.activate().unwrap();
    assert_eq!(region.opacity(), 0.0);
    assert_eq!(region.text(), "");

    sched.advance_to(399);
    assert_eq!(region.opacity(), 0.0);
    assert_eq!(c.index(), 0);

    sched.advance_to(400);
    assert_eq!(
        region.writes(),
        vec![
            RegionWrite::Opacity(0.0),
            RegionWrite::Text("A".into()),
            RegionWrite::Opacity(1.0),
        ]
    );
    assert_eq!(c.index(), 1);
}

#[test]
fn index_returns_to_start_after_list_length_activations() {
    let messages = heart_card::MESSAGES;
    let (c, region, sched) = cycler(messages);
    for _ in 0..messages.len() {
        c.activate().unwrap();
        sched.advance_by(500);
    }
    assert_eq!(c.index(), 0);
    assert_eq!(c.messages().len(), messages.len());
    let shown = region.shown_texts();
    assert_eq!(shown.len(), messages.len());
    for (i, text) in shown.iter().enumerate() {
        assert_eq!(text, messages[i]);
    }
}

#[test]
fn single_message_list_repeats_itself() {
    let (c, region, sched) = cycler(&["only"]);
    for _ in 0..3 {
        c.activate().unwrap();
        sched.advance_by(450);
    }
    assert_eq!(region.shown_texts(), vec!["only"; 3]);
    assert_eq!(c.index(), 0);
}

// Rapid clicks are not serialized: each click queues its own reveal, so the
// second click's fade-out is undone by the first click's reveal and both
// messages are shown back to back.
#[test]
fn overlapping_activations_are_not_serialized() {
    let (c, region, sched) = cycler(&["A", "B", "C"]);
    c.activate().unwrap();
    sched.advance_to(100);
    c.activate().unwrap();

    sched.advance_to(400);
    assert_eq!(region.text(), "A");
    assert_eq!(region.opacity(), 1.0, "second fade-out was overridden");

    sched.advance_to(500);
    assert_eq!(region.text(), "B");
    assert_eq!(c.index(), 2);
    assert_eq!(
        region.writes(),
        vec![
            RegionWrite::Opacity(0.0),
            RegionWrite::Opacity(0.0),
            RegionWrite::Text("A".into()),
            RegionWrite::Opacity(1.0),
            RegionWrite::Text("B".into()),
            RegionWrite::Opacity(1.0),
        ]
    );
}

#[test]
fn spawner_population_over_time() {
    let (s, layer, sched) = spawner(SequenceSource::new([0.1, 0.9, 0.5, 0.3]));
    s.start().unwrap();

    sched.advance_to(299);
    assert_eq!(layer.live_count(), 0);
    sched.advance_to(300);
    assert_eq!(layer.live_count(), 1);
    sched.advance_to(600);
    assert_eq!(layer.live_count(), 2);

    sched.advance_to(5299);
    assert!(layer.live_ids().contains(&0));
    sched.advance_to(5300);
    let ids = layer.live_ids();
    assert!(!ids.contains(&0), "first heart outlived its 5000ms lifetime");
    assert!(ids.contains(&1));
    // hearts from the ticks at 600..=5100 remain
    assert_eq!(layer.live_count(), 16);
}

#[test]
fn every_heart_is_removed_exactly_at_its_own_lifetime() {
    let (s, layer, sched) = spawner(SequenceSource::new([0.42]));
    s.start().unwrap();
    sched.advance_to(300 * 5);
    assert_eq!(layer.live_ids(), vec![0, 1, 2, 3, 4]);

    // heart k is created at 300 * (k + 1) and must vanish at that + 5000
    for k in 0..5u64 {
        let created = 300 * (k + 1);
        sched.advance_to(created + 4999);
        assert!(layer.live_ids().contains(&k), "heart {k} removed early");
        sched.advance_to(created + 5000);
        assert!(!layer.live_ids().contains(&k), "heart {k} not removed on time");
    }
}

#[test]
fn steady_state_population_stays_bounded() {
    let (s, layer, sched) = spawner(SequenceSource::new([0.7, 0.2]));
    s.start().unwrap();
    for t in (10_000..60_000).step_by(100) {
        sched.advance_to(t);
        let live = layer.live_count();
        assert!((16..=17).contains(&live), "{live} hearts alive at {t}ms");
    }
    assert_eq!(layer.attached_total() - layer.detached_total(), layer.live_count() as u64);
}

#[test]
fn each_tick_draws_in_range_parameters() {
    let draws = [0.0, 0.999_999, 0.5, 0.25, 0.999_999_999_999, 0.0001];
    let (s, layer, sched) = spawner(SequenceSource::new(draws));
    s.start().unwrap();
    sched.advance_to(300 * 12);
    let hearts = layer.live_hearts();
    assert_eq!(hearts.len(), 12);
    for h in hearts {
        assert!((0.0..100.0).contains(&h.left_vw), "left {}", h.left_vw);
        assert!((3.0..5.0).contains(&h.fall_secs), "fall {}", h.fall_secs);
        assert_eq!(h.glyph, '\u{2764}');
    }
}
