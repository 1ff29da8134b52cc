use super::*;

#[test]
fn test_event_animation_progress_is_clamped() {
    //! Progress is 0 before the start, 1 after the end

    let anim = EventAnimation::new(1.0, 2.0);
    assert_eq!(anim.progress(0.0), 0.0);
    assert!((anim.progress(2.0) - 0.5).abs() < 1e-6);
    assert_eq!(anim.progress(10.0), 1.0);
    assert!(!anim.is_over(2.9));
    assert!(anim.is_over(3.0));
}

#[test]
fn test_periodic_animation_wraps() {
    let anim = PeriodicAnimation::new(0.0, 2.0);
    assert!((anim.phase(0.5) - 0.25).abs() < 1e-6);
    assert!((anim.phase(2.5) - 0.25).abs() < 1e-6);
}

#[test]
fn test_set_reports_completion_in_deadline_order() {
    //! Two animations crossing their deadlines in one tick are reported
    //! earliest deadline first, regardless of start order

    let mut set = AnimationSet::new();
    let late = set.start_event(EventAnimation::new(0.0, 2.0));
    let early = set.start_event(EventAnimation::new(0.0, 1.0));

    assert!(set.update(0.5).is_empty(), "Nothing should finish before its deadline");

    let finished: Vec<_> = set.update(5.0).iter().filter_map(|e| e.finished_id()).collect();
    assert_eq!(finished, vec![early, late]);
    assert!(set.is_empty(), "Finished animations leave the set");
}

#[test]
fn test_interrupted_animation_never_completes() {
    let mut set = AnimationSet::new();
    let id = set.start_event(EventAnimation::new(0.0, 1.0));

    assert!(set.interrupt(id));
    assert!(!set.interrupt(id), "Second interrupt should be a no-op");
    assert!(set.update(5.0).is_empty(), "Interrupted animation must not emit completion");
}

#[test]
fn test_chain_links_start_when_previous_completion_observed() {
    //! The second link starts at the tick that observed the first one
    //! ending, not at the first link's nominal end time

    let mut set = AnimationSet::new();
    let id = set.start_chain(EventAnimationChain::new(0.0, [1.0, 1.0]));

    let events = set.update(1.5);
    assert_eq!(events, vec![AnimationEvent::ChainAdvanced { id, link: 1 }]);
    assert_eq!(set.link_progress(id, 0, 1.5), Some(1.0));
    assert_eq!(set.link_progress(id, 1, 1.5), Some(0.0));

    assert!(set.update(2.4).is_empty(), "Second link started at 1.5 and is still running");

    let events = set.update(2.6);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].finished_id(), Some(id));
}

#[test]
fn test_easing_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInOutCubic,
    ] {
        assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
    }
}
