use super::*;
use crate::brush::Brush;
use crate::core::Direction;
use crate::elements::{EL_CRAY, EL_DRAY, EL_DUST, EL_FILT, EL_LDTC, EL_NONE, EL_PHOT, EL_PSCN, EL_STNE};
use crate::sample::{StackSample, CONDUCTOR_FLAG, FILTER_FLAG};
use crate::systems::config::{ClickOutcome, ConfigTool, DrawCommand, Param};
use crate::systems::stack::{StackOutcome, StackTool, MSG_MANY_STACKED, MSG_UNSTACK_NO_SPACE};
use crate::systems::BrushTool;

#[test]
fn add_particle_rejects_taken_cells_per_layer() {
    let mut world = Sandbox::new(16, 16);

    let dust = world.add_particle(3, 3, EL_DUST);
    assert_eq!(dust, Some(0));
    assert_eq!(world.add_particle(3, 3, EL_STNE), None);

    // Energy lives on its own layer
    assert_eq!(world.add_particle(3, 3, EL_PHOT), Some(1));
    assert_eq!(world.particle_count(), 2);

    assert_eq!(world.add_particle(-1, 3, EL_DUST), None);
    assert_eq!(world.add_particle(3, 3, EL_NONE), None);
    assert_eq!(world.add_particle(4, 4, 200), None);
    assert!(world.occupancy_is_consistent());
}

#[test]
fn add_particle_respects_capacity() {
    let mut world = Sandbox::with_capacity(8, 8, 2);
    assert!(world.add_particle(0, 0, EL_DUST).is_some());
    assert!(world.add_particle(1, 0, EL_DUST).is_some());
    assert_eq!(world.add_particle(2, 0, EL_DUST), None);
}

#[test]
fn remove_particle_prefers_energy_layer() {
    let mut world = Sandbox::new(8, 8);
    let dust = world.add_particle(2, 2, EL_DUST).unwrap();
    let phot = world.add_particle(2, 2, EL_PHOT).unwrap();

    assert!(world.remove_particle_at(2, 2));
    assert!(world.live_particle(phot).is_none());
    assert!(world.live_particle(dust).is_some());

    assert!(world.remove_particle_at(2, 2));
    assert!(!world.remove_particle_at(2, 2));
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn kill_leaves_foreign_map_entries_alone() {
    let mut world = Sandbox::new(8, 8);
    let a = world.add_particle(1, 1, EL_DUST).unwrap();
    let b = world.add_particle(1, 2, EL_DUST).unwrap();

    // Move `a` onto b's cell without touching the map
    world.particles_mut()[a].y = 2.0;
    world.kill_particle(a);

    let entry = world.cell(Layer::Matter, Point::new(1, 2)).unwrap();
    assert_eq!(entry.handle, b);
    assert!(world.cell(Layer::Matter, Point::new(1, 1)).is_some());

    world.reconcile();
    assert!(world.cell(Layer::Matter, Point::new(1, 1)).is_none());
    assert!(world.occupancy_is_consistent());
}

#[test]
fn kill_hands_stacked_cell_to_next_highest_handle() {
    let mut world = Sandbox::new(8, 8);
    let low = world.add_particle(3, 3, EL_DUST).unwrap();
    let mid = world.add_particle(3, 4, EL_DUST).unwrap();
    let high = world.add_particle(3, 5, EL_DUST).unwrap();
    for h in [mid, high] {
        world.particles_mut()[h].y = 3.0;
    }
    world.reconcile();
    assert_eq!(world.cell(Layer::Matter, Point::new(3, 3)).map(|e| e.handle), Some(high));

    world.kill_particle(high);
    assert_eq!(world.cell(Layer::Matter, Point::new(3, 3)).map(|e| e.handle), Some(mid));
    assert_eq!(world.add_particle(3, 3, EL_DUST), None);
    assert!(world.occupancy_is_consistent());

    world.kill_particle(mid);
    world.kill_particle(low);
    assert!(world.cell(Layer::Matter, Point::new(3, 3)).is_none());
    assert!(world.add_particle(3, 3, EL_DUST).is_some());
}

#[test]
fn kill_ignores_other_layer_when_handing_over() {
    let mut world = Sandbox::new(8, 8);
    let dust = world.add_particle(2, 2, EL_DUST).unwrap();
    let phot = world.add_particle(2, 2, EL_PHOT).unwrap();

    world.kill_particle(dust);
    assert!(world.cell(Layer::Matter, Point::new(2, 2)).is_none());
    assert_eq!(world.cell(Layer::Energy, Point::new(2, 2)).map(|e| e.handle), Some(phot));
    assert!(world.occupancy_is_consistent());
}

#[test]
fn reconcile_gives_shared_cells_to_highest_handle() {
    let mut world = Sandbox::new(8, 8);
    let low = world.add_particle(4, 1, EL_DUST).unwrap();
    let high = world.add_particle(4, 2, EL_DUST).unwrap();
    world.particles_mut()[low].y = 2.0;

    assert!(!world.occupancy_is_consistent());
    world.reconcile();
    assert!(world.occupancy_is_consistent());
    assert_eq!(world.cell(Layer::Matter, Point::new(4, 2)).map(|e| e.handle), Some(high));
    assert_eq!(world.frame(), 1);
}

#[test]
fn reconcile_removes_particles_outside_the_grid() {
    let mut world = Sandbox::new(8, 8);
    let h = world.add_particle(7, 7, EL_DUST).unwrap();
    world.particles_mut()[h].y = 8.0;
    world.reconcile();
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn load_bundle_replaces_content_and_clears_world() {
    let mut world = Sandbox::new(8, 8);
    world.add_particle(1, 1, EL_DUST).unwrap();

    let json = r#"{"elements":[{"id":1,"key":"base:glow","energy":true}]}"#;
    world.load_content_bundle_json(json).unwrap();

    assert_eq!(world.particle_count(), 0);
    assert!(world.is_energy(1));
    assert!(world.load_content_bundle_json("{").is_err());
}

#[test]
fn from_config_rejects_empty_grid() {
    let config = EditorConfig {
        width: 0,
        ..EditorConfig::default()
    };
    assert!(Sandbox::from_config(&config).is_err());

    let world = Sandbox::from_config(&EditorConfig::default()).unwrap();
    assert_eq!(world.width(), 612);
    assert_eq!(world.height(), 384);
}

#[test]
fn notify_collects_notices_until_taken() {
    let mut world = Sandbox::new(4, 4);
    world.notify("hello");
    assert_eq!(world.notices(), ["hello".to_string()]);
    assert_eq!(world.take_notices(), vec!["hello".to_string()]);
    assert!(world.notices().is_empty());
}

// === Tools against the sandbox ===

#[test]
fn stack_then_unstack_restores_a_column() {
    let mut world = Sandbox::new(32, 32);
    let handles: Vec<_> = (10..13)
        .map(|y| world.add_particle(5, y, EL_DUST).unwrap())
        .collect();
    let mut tool = StackTool::new();
    let brush = Brush::point();

    let outcome = tool.apply_over_rectangle(&mut world, &brush, Point::new(0, 0), Point::new(20, 20));
    assert!(matches!(outcome, StackOutcome::Stacked { cell, .. } if cell == Point::new(5, 10)));
    world.reconcile();

    let outcome = tool.apply_at_point(&mut world, &brush, Point::new(5, 10));
    assert!(matches!(outcome, StackOutcome::Unstacked { total: 3, .. }));
    for (i, &h) in handles.iter().enumerate() {
        assert_eq!(world.particles()[h].cell(), Point::new(5, 10 + i as i32));
    }
    assert!(world.occupancy_is_consistent());
    assert!(world.take_notices().is_empty());
}

#[test]
fn unstack_stops_at_blocker_and_warns_once_per_anchor() {
    let mut world = Sandbox::new(32, 32);
    for x in 0..3 {
        let h = world.add_particle(x, 0, EL_DUST).unwrap();
        world.particles_mut()[h].x = 5.0;
        world.particles_mut()[h].y = 5.0;
    }
    world.reconcile();
    world.add_particle(5, 7, EL_STNE).unwrap();

    let mut tool = StackTool::new();
    let outcome = tool.apply_at_point(&mut world, &Brush::point(), Point::new(5, 5));
    match outcome {
        StackOutcome::Unstacked { placed, total, .. } => {
            assert_eq!(total, 3);
            assert_eq!(placed.len(), 2);
            assert_eq!(placed[1].1, Point::new(5, 6));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(world.take_notices(), vec![MSG_UNSTACK_NO_SPACE.to_string()]);
    assert_eq!(tool.last_notice_at(), Some(Point::new(5, 5)));

    // Same anchor: no repeat notice
    tool.apply_at_point(&mut world, &Brush::point(), Point::new(5, 5));
    assert!(world.take_notices().is_empty());
}

#[test]
fn deep_stack_emits_advisory() {
    let mut world = Sandbox::new(32, 32);
    for x in 0..6 {
        world.add_particle(x, 3, EL_DUST).unwrap();
    }
    let mut tool = StackTool::new();
    let outcome = tool.apply_along_line(&mut world, &Brush::point(), Point::new(0, 3), Point::new(5, 3), false);
    assert!(matches!(outcome, StackOutcome::Stacked { ref order, .. } if order.len() == 6));
    assert_eq!(world.take_notices(), vec![MSG_MANY_STACKED.to_string()]);
}

#[test]
fn config_session_writes_ray_lengths() {
    let mut world = Sandbox::new(64, 64);
    let ray = world.add_particle(10, 10, EL_DRAY).unwrap();
    world.add_particle(9, 10, EL_PSCN).unwrap();

    let mut tool = ConfigTool::new();
    assert_eq!(tool.on_click(&mut world, Point::new(10, 10)), ClickOutcome::Started { handle: ray });

    // Four cells right: inner length 4
    let outcome = tool.on_click(&mut world, Point::new(14, 10));
    assert_eq!(outcome, ClickOutcome::Advanced { handle: ray, param: Param::Tmp, value: 4 });
    assert_eq!(world.particles()[ray].tmp, 4);

    // Eight cells right: outer length measured past the inner segment
    let outcome = tool.on_click(&mut world, Point::new(18, 10));
    assert_eq!(outcome, ClickOutcome::Finished { handle: ray, param: Param::Tmp2, value: 4 });
    assert_eq!(world.particles()[ray].tmp2, 4);
    assert!(!tool.is_configuring());
}

#[test]
fn config_session_drops_when_anchor_is_removed() {
    let mut world = Sandbox::new(64, 64);
    let ray = world.add_particle(10, 10, EL_DRAY).unwrap();
    let mut tool = ConfigTool::new();
    tool.on_click(&mut world, Point::new(10, 10));

    world.kill_particle(ray);
    assert!(!tool.on_frame_update(&world, Point::new(14, 10)));
    assert!(!tool.is_configuring());
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn far_off_grid_cursor_commits_full_length() {
    let mut world = Sandbox::new(64, 64);
    let ray = world.add_particle(20, 20, EL_DRAY).unwrap();
    let mut tool = ConfigTool::new();
    tool.on_click(&mut world, Point::new(20, 20));

    assert!(tool.on_frame_update(&world, Point::new(70_000, 20)));
    assert!(!tool.sample().in_sim);
    let outcome = tool.on_click(&mut world, Point::new(70_000, 20));
    assert_eq!(outcome, ClickOutcome::Advanced { handle: ray, param: Param::Tmp, value: 69_980 });

    assert!(tool.on_frame_update(&world, Point::new(i32::MAX, i32::MIN)));
    let mut out: Vec<DrawCommand> = Vec::new();
    tool.draw_overlay(&mut out);
    assert!(!out.is_empty());
}

/// DUST and DRAY share (10,10); an LDTC waits elsewhere with a lower handle
fn mixed_stack(world: &mut Sandbox) -> (usize, usize, usize) {
    let ldtc = world.add_particle(30, 30, EL_LDTC).unwrap();
    let dust = world.add_particle(10, 10, EL_DUST).unwrap();
    let ray = world.add_particle(11, 10, EL_DRAY).unwrap();
    world.particles_mut()[ray].x = 10.0;
    world.reconcile();
    (ldtc, dust, ray)
}

#[test]
fn click_skips_unconfigurable_entries_in_the_stack() {
    let mut world = Sandbox::new(64, 64);
    let (_, dust, ray) = mixed_stack(&mut world);
    let mut tool = ConfigTool::new();

    tool.on_frame_update(&world, Point::new(10, 10));
    assert_eq!(tool.sample().stack.len(), 2);
    assert_eq!(tool.sample().stack[0].handle, dust);
    assert_eq!(tool.target().map(|e| e.handle), Some(ray));

    assert_eq!(tool.on_click(&mut world, Point::new(10, 10)), ClickOutcome::Started { handle: ray });
}

#[test]
fn lower_configurable_entering_pinned_cell_drops_session() {
    let mut world = Sandbox::new(64, 64);
    let (ldtc, _, ray) = mixed_stack(&mut world);
    let mut tool = ConfigTool::new();
    tool.on_click(&mut world, Point::new(10, 10));
    assert!(tool.on_frame_update(&world, Point::new(14, 10)));

    // The anchor itself is untouched, but it is no longer the first configurable entry
    world.particles_mut()[ldtc].x = 10.0;
    world.particles_mut()[ldtc].y = 10.0;
    assert!(!tool.on_frame_update(&world, Point::new(14, 10)));
    assert!(!tool.is_configuring());

    let r = world.particles()[ray];
    assert_eq!((r.tmp, r.tmp2), (0, 0));
    let l = world.particles()[ldtc];
    assert_eq!((l.life, l.tmp), (0, 0));

    // Dropped is dropped: later frames stay ready and report intact
    for _ in 0..3 {
        assert!(tool.on_frame_update(&world, Point::new(14, 10)));
        assert!(!tool.is_configuring());
    }
    assert_eq!(tool.target().map(|e| e.handle), None);
}

#[test]
fn stack_edit_depth_picks_deeper_entry_and_clamps() {
    let mut world = Sandbox::new(32, 32);
    let dray = world.add_particle(5, 5, EL_DRAY).unwrap();
    let cray = world.add_particle(6, 5, EL_CRAY).unwrap();
    world.particles_mut()[cray].x = 5.0;
    world.reconcile();

    let mut tool = ConfigTool::new();
    tool.on_frame_update(&world, Point::new(5, 5));
    assert_eq!(tool.target().map(|e| e.handle), Some(dray));

    tool.set_stack_edit_depth(1);
    assert_eq!(tool.on_click(&mut world, Point::new(5, 5)), ClickOutcome::Started { handle: cray });
    tool.on_cancel();

    tool.set_stack_edit_depth(5);
    tool.on_frame_update(&world, Point::new(5, 5));
    assert_eq!(tool.sample().effective_depth, 1);
    assert_eq!(tool.target().map(|e| e.handle), Some(cray));

    // Empty cell: depth clamps to zero
    let sample = StackSample::take(&world, Point::new(20, 20), None, 5);
    assert_eq!(sample.effective_depth, 0);
}

#[test]
fn sample_flags_conductors_and_filters_around_stack_cell() {
    let mut world = Sandbox::new(32, 32);
    world.add_particle(10, 10, EL_DRAY).unwrap();
    world.add_particle(9, 10, EL_PSCN).unwrap();
    world.add_particle(11, 10, EL_FILT).unwrap();
    world.add_particle(10, 11, EL_DUST).unwrap();

    let sample = StackSample::take(&world, Point::new(10, 10), None, 0);
    assert_eq!(sample.adjacent_flags(Direction::new(-1, 0)), CONDUCTOR_FLAG);
    assert_eq!(sample.adjacent_flags(Direction::new(1, 0)), FILTER_FLAG);
    assert_eq!(sample.adjacent_flags(Direction::new(0, 1)), 0);
    assert_eq!(sample.adjacent_flags(Direction::new(0, -1)), 0);

    // Pinned elsewhere, the cursor no longer decides the neighbourhood
    let pinned = StackSample::take(&world, Point::new(0, 0), Some(Point::new(10, 10)), 0);
    assert_eq!(pinned.adjacent, sample.adjacent);
    assert_eq!(pinned.stack_position, Point::new(10, 10));
}

// === Editor facade (native-safe calls only) ===

#[test]
fn editor_stack_reconciles_after_each_stroke() {
    let mut editor = Editor::new(32, 32);
    editor.set_brush(1, 0, 0);
    for y in 4..7 {
        assert!(editor.add_particle(2, y, EL_DUST) >= 0);
    }

    assert_eq!(editor.stack_rect(0, 0, 10, 10), 3);
    assert!(editor.sandbox().occupancy_is_consistent());
    // The first handle stays on the shared cell; two move out
    assert_eq!(editor.stack_point(2, 4), 2);
    assert!(editor.sandbox().occupancy_is_consistent());
    assert_eq!(editor.particle(1)[2], 5.0);
}

#[test]
fn editor_release_cancels_then_clears() {
    let mut editor = Editor::new(32, 32);
    editor.add_particle(6, 6, EL_DRAY);
    editor.add_particle(9, 9, EL_DUST);

    assert_eq!(editor.config_click(6, 6), 1);
    assert!(editor.is_configuring());
    assert_eq!(editor.release_drag(9, 9), 2);
    assert_eq!(editor.release_click(9, 9), 0);
    assert!(!editor.is_configuring());

    assert_eq!(editor.release_click(9, 9), 1);
    assert_eq!(editor.particle_count(), 1);
}

#[test]
fn editor_overlay_starts_with_crosshair() {
    let mut editor = Editor::new(16, 16);
    editor.config_frame(3, 4);
    let words = editor.overlay();
    assert_eq!(words, vec![2, 3, 4, 0, 0, 0]);
}

#[test]
fn editor_blocked_unstack_reports_nothing_moved() {
    let mut editor = Editor::new(32, 32);
    editor.set_brush(1, 0, 0);
    for &(x, y) in &[(5, 6), (6, 5), (5, 5)] {
        editor.add_particle(x, y, EL_DUST);
    }
    assert_eq!(editor.stack_rect(0, 0, 10, 10), 3);
    editor.add_particle(5, 6, EL_STNE);

    assert_eq!(editor.stack_point(5, 5), 0);
    assert_eq!(editor.take_notices(), vec![MSG_UNSTACK_NO_SPACE.to_string()]);
}

#[test]
fn editor_brush_radius_is_clamped_to_grid() {
    let mut editor = Editor::new(16, 12);
    editor.set_brush(1, i32::MAX, 0);
    assert_eq!(editor.brush().radius(), Point::new(16, 0));

    editor.set_brush(0, -4, i32::MAX);
    assert_eq!(editor.brush().radius(), Point::new(0, 16));

    for y in 0..12 {
        editor.add_particle(3, y, EL_DUST);
    }
    assert_eq!(editor.stack_point(3, 3), 12);
}

#[test]
fn editor_far_cursor_keeps_overlay_finite() {
    let mut editor = Editor::new(32, 32);
    let ray = editor.add_particle(20, 20, EL_DRAY);
    assert_eq!(editor.config_click(20, 20), 1);

    assert!(editor.config_frame(i32::MAX, 20));
    assert_eq!(editor.overlay().len(), 6);
    assert_eq!(editor.config_click(i32::MAX, 20), 2);
    assert_eq!(editor.particle(ray as u32)[4], (i32::MAX - 20) as f32);
}

#[test]
fn editor_config_target_follows_hover_then_anchor() {
    let mut editor = Editor::new(32, 32);
    let ray = editor.add_particle(6, 6, EL_DRAY);
    editor.add_particle(9, 9, EL_DUST);

    editor.config_frame(9, 9);
    assert_eq!(editor.config_target(), -1);
    editor.config_frame(6, 6);
    assert_eq!(editor.config_target(), ray);

    editor.config_click(6, 6);
    editor.config_frame(12, 6);
    assert_eq!(editor.config_target(), ray);
    editor.config_cancel();
    assert_eq!(editor.config_target(), -1);
}
