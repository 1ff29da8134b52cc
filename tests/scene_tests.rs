//! Integration tests for the bundled board scene
//!
//! Loads `scenes/board.json` the way `xfcheckers check` does and inspects
//! the recorded traversal.

use bevy::math::Vec3;
use std::path::PathBuf;
use xfcheckers::scene::{
    PickTarget, SceneDescription, SceneError, SceneGraph, TraceContext, TraceEvent,
};

fn board_scene() -> SceneGraph {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenes/board.json");
    let description = SceneDescription::from_path(&path).expect("bundled scene parses");
    SceneGraph::from_description(&description).expect("bundled scene loads")
}

#[test]
fn test_board_scene_loads_cleanly() {
    let graph = board_scene();

    assert!(graph.warnings().is_empty(), "unexpected warnings: {:?}", graph.warnings());
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.primitive_count(), 3);
    assert_eq!(graph.root().id(), "table");
    assert!(!graph.has_cycle());
}

#[test]
fn test_board_scene_traversal() {
    //! Every primitive reference is drawn once per parent and the matrix
    //! stack is balanced at the end

    let mut graph = board_scene();
    let mut ctx = TraceContext::new();
    graph.display_scene(&mut ctx);

    assert_eq!(ctx.draws().count(), 4);
    assert_eq!(ctx.depth(), 0);
    let pushes = ctx
        .events()
        .iter()
        .filter(|e| matches!(e, TraceEvent::PushMatrix))
        .count();
    let pops = ctx
        .events()
        .iter()
        .filter(|e| matches!(e, TraceEvent::PopMatrix))
        .count();
    assert_eq!(pushes, pops);
}

#[test]
fn test_board_scene_texture_and_picks() {
    let mut graph = board_scene();
    let mut ctx = TraceContext::new();
    graph.display_scene(&mut ctx);

    match ctx.draw_of("slab") {
        Some(TraceEvent::Draw {
            length_s,
            length_t,
            pick_id,
            ..
        }) => {
            assert_eq!((*length_s, *length_t), (1.0, 1.0), "Board texture scale wins over the table's");
            assert_eq!(*pick_id, Some(1));
        }
        other => panic!("slab not drawn: {other:?}"),
    }

    let picks: Vec<_> = ctx
        .events()
        .iter()
        .filter_map(|e| match e {
            TraceEvent::Pick { target, .. } => Some(target.clone()),
            _ => None,
        })
        .collect();
    assert!(picks.contains(&PickTarget::Component("light-man".to_string())));
}

#[test]
fn test_board_scene_animation_moves_king() {
    //! Sampling the bob animation mid-way lifts the dark king and its crown

    let mut graph = board_scene();
    graph.update(1.0);
    let mut ctx = TraceContext::at_time(1.0);
    graph.display_scene(&mut ctx);

    let crown = match ctx.draw_of("crown") {
        Some(TraceEvent::Draw { world, .. }) => world.w_axis.truncate(),
        other => panic!("crown not drawn: {other:?}"),
    };
    assert!((crown - Vec3::new(5.0, 0.35, 5.0)).length() < 1e-4, "crown at {crown}");
}

#[test]
fn test_board_scene_highlight_toggle() {
    let mut graph = board_scene();
    assert!(graph.set_highlight_active("light-man", true));
    assert!(!graph.set_highlight_active("board", true), "Board declares no highlight");

    let mut ctx = TraceContext::new();
    graph.display_scene(&mut ctx);
    assert!(ctx
        .events()
        .iter()
        .any(|e| matches!(e, TraceEvent::Highlight(Some(_)))));
}

#[test]
fn test_scene_cycle_is_fatal() {
    let description = SceneDescription::from_json(
        r#"{
            "root": "a",
            "components": [
                { "id": "a", "materials": ["inherit"], "children": { "components": ["b"] } },
                { "id": "b", "materials": ["inherit"], "children": { "components": ["a"] } }
            ]
        }"#,
    )
    .unwrap();

    assert!(matches!(
        SceneGraph::from_description(&description),
        Err(SceneError::Cycle(_))
    ));
}

#[test]
fn test_scene_parse_error() {
    assert!(matches!(
        SceneDescription::from_json("{ \"root\": "),
        Err(SceneError::Parse(_))
    ));
}
