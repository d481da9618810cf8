//! Engine-level layout scenarios.

use super::*;
use crate::primitives::{Color, Rect, Size};
use crate::render::RenderCommandKind;
use crate::text::TextStyle;

const BG: Color = Color::rgb(10, 20, 30);

fn engine(width: f32, height: f32) -> LayoutEngine {
    let mut engine = LayoutEngine::new(Size::new(width, height));
    engine.set_measure_text(|text: &str, style: &TextStyle| {
        Size::new(text.len() as f32 * 10.0, style.font_size)
    });
    engine
}

fn fixed(width: f32, height: f32) -> ElementDeclaration {
    ElementDeclaration::new()
        .size(Sizing::fixed(width), Sizing::fixed(height))
        .background(BG)
}

#[test]
fn test_empty_frame_has_no_commands() {
    let mut engine = engine(800.0, 600.0);
    let commands = engine.frame(|_| {});
    assert!(commands.is_empty());
    assert!(engine.errors().is_empty());
}

#[test]
fn test_sidebar_scenario() {
    let mut engine = engine(1280.0, 720.0);
    let sidebar = ElementId::new("SideBar");
    let content = ElementId::new("MainContent");

    let commands = engine.frame(|ui| {
        let outer = ElementDeclaration::new()
            .size(Sizing::grow(), Sizing::grow())
            .padding_all(16.0)
            .child_gap(16.0);
        ui.element(ElementId::new("OuterContainer"), outer, |ui| {
            ui.leaf(
                sidebar,
                ElementDeclaration::new()
                    .size(Sizing::fixed(300.0), Sizing::grow())
                    .background(BG),
            );
            ui.leaf(
                content,
                ElementDeclaration::new()
                    .size(Sizing::grow(), Sizing::grow())
                    .background(BG),
            );
        });
    });

    assert_eq!(commands.bounding_box(sidebar), Some(Rect::new(16.0, 16.0, 300.0, 688.0)));
    assert_eq!(commands.bounding_box(content), Some(Rect::new(332.0, 16.0, 932.0, 688.0)));
    assert_eq!(commands.len(), 2);
}

#[test]
fn test_grow_takes_remaining_width() {
    for width in [500.0, 800.0, 1280.0] {
        let mut engine = engine(width, 100.0);
        let grow = ElementId::new("Grow");
        engine.frame(|ui| {
            let row = ElementDeclaration::new()
                .size(Sizing::grow(), Sizing::grow())
                .padding_all(10.0)
                .child_gap(20.0);
            ui.element(ElementId::new("Row"), row, |ui| {
                ui.leaf(ElementId::new("Fixed"), fixed(300.0, 10.0));
                ui.leaf(grow, ElementDeclaration::new().width(Sizing::grow()));
            });
        });
        let bounds = engine.element_bounds(grow).unwrap_or_default();
        assert_eq!(bounds.width, width - 300.0 - 20.0 - 20.0);
    }
}

#[test]
fn test_grow_clamps_at_minimum() {
    let mut engine = engine(320.0, 100.0);
    let grow = ElementId::new("Grow");
    engine.frame(|ui| {
        ui.leaf(ElementId::new("Fixed"), fixed(300.0, 10.0));
        ui.leaf(grow, ElementDeclaration::new().width(Sizing::grow_min(50.0)));
    });
    assert_eq!(engine.element_bounds(grow).map(|b| b.width), Some(50.0));
}

#[test]
fn test_ancestors_precede_descendants() {
    let mut engine = engine(400.0, 400.0);
    let ids = [ElementId::new("A"), ElementId::new("B"), ElementId::new("C")];
    let decl = ElementDeclaration::new().padding_all(4.0).background(BG);

    let commands = engine.frame(|ui| {
        ui.element(ids[0], decl, |ui| {
            ui.element(ids[1], decl, |ui| {
                ui.leaf(ids[2], decl);
            });
        });
    });

    let order: Vec<ElementId> = commands.iter().map(|c| c.id).collect();
    assert_eq!(order, ids);
}

#[test]
fn test_fit_wraps_text_and_padding() {
    let mut engine = engine(400.0, 400.0);
    let card = ElementId::new("Card");
    let commands = engine.frame(|ui| {
        ui.element(card, ElementDeclaration::new().padding_all(8.0).background(BG), |ui| {
            ui.text("hello", TextStyle::new(16.0, Color::WHITE));
        });
    });

    assert_eq!(commands.bounding_box(card), Some(Rect::new(0.0, 0.0, 66.0, 32.0)));
    let text = &commands[1];
    assert_eq!(text.bounding_box, Rect::new(8.0, 8.0, 50.0, 16.0));
    assert!(matches!(
        text.kind,
        RenderCommandKind::Text { text: "hello", font_size: 16.0, .. }
    ));
}

#[test]
fn test_child_alignment() {
    let mut engine = engine(400.0, 400.0);
    let child = ElementId::new("Child");
    engine.frame(|ui| {
        let parent = fixed(200.0, 100.0)
            .align_x(AlignX::Center)
            .align_y(AlignY::Bottom);
        ui.element(ElementId::new("Parent"), parent, |ui| {
            ui.leaf(child, fixed(50.0, 20.0));
        });
    });
    assert_eq!(engine.element_bounds(child), Some(Rect::new(75.0, 80.0, 50.0, 20.0)));
}

#[test]
fn test_top_to_bottom_flow() {
    let mut engine = engine(400.0, 400.0);
    let parent = ElementId::new("Column");
    let (a, b) = (ElementId::new("A"), ElementId::new("B"));
    engine.frame(|ui| {
        let column = ElementDeclaration::new()
            .direction(LayoutDirection::TopToBottom)
            .padding_all(10.0)
            .child_gap(5.0);
        ui.element(parent, column, |ui| {
            ui.leaf(a, fixed(20.0, 10.0));
            ui.leaf(b, fixed(30.0, 10.0));
        });
    });

    assert_eq!(engine.element_bounds(parent), Some(Rect::new(0.0, 0.0, 50.0, 45.0)));
    assert_eq!(engine.element_bounds(a), Some(Rect::new(10.0, 10.0, 20.0, 10.0)));
    assert_eq!(engine.element_bounds(b), Some(Rect::new(10.0, 25.0, 30.0, 10.0)));
}

#[test]
fn test_percent_of_parent() {
    let mut engine = engine(400.0, 400.0);
    let (quarter, rest) = (ElementId::new("Quarter"), ElementId::new("Rest"));
    engine.frame(|ui| {
        ui.element(ElementId::new("Parent"), fixed(400.0, 100.0), |ui| {
            ui.leaf(quarter, ElementDeclaration::new().size(Sizing::percent(0.25), Sizing::grow()));
            ui.leaf(rest, ElementDeclaration::new().size(Sizing::grow(), Sizing::percent(0.5)));
        });
    });
    assert_eq!(engine.element_bounds(quarter), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    assert_eq!(engine.element_bounds(rest), Some(Rect::new(100.0, 0.0, 300.0, 50.0)));
}

#[test]
fn test_grow_respects_maximum() {
    let mut engine = engine(500.0, 100.0);
    let (capped, free) = (ElementId::new("Capped"), ElementId::new("Free"));
    engine.frame(|ui| {
        ui.leaf(capped, ElementDeclaration::new().width(Sizing::grow_range(0.0, 100.0)));
        ui.leaf(free, ElementDeclaration::new().width(Sizing::grow()));
    });
    assert_eq!(engine.element_bounds(capped).map(|b| b.width), Some(100.0));
    assert_eq!(engine.element_bounds(free).map(|b| b.width), Some(400.0));
}

#[test]
fn test_grow_siblings_equalize() {
    let mut engine = engine(600.0, 100.0);
    let (wide, empty) = (ElementId::new("Wide"), ElementId::new("Empty"));
    engine.frame(|ui| {
        ui.element(wide, ElementDeclaration::new().width(Sizing::grow()), |ui| {
            ui.text("0123456789", TextStyle::default());
        });
        ui.leaf(empty, ElementDeclaration::new().width(Sizing::grow()));
    });
    assert_eq!(engine.element_bounds(wide).map(|b| b.width), Some(300.0));
    assert_eq!(engine.element_bounds(empty), Some(Rect::new(300.0, 0.0, 300.0, 0.0)));
}

#[test]
fn test_overflow_shrinks_largest_first() {
    let mut engine = engine(400.0, 100.0);
    let (a, b) = (ElementId::new("A"), ElementId::new("B"));
    engine.frame(|ui| {
        ui.element(ElementId::new("Row"), fixed(200.0, 50.0), |ui| {
            ui.element(a, ElementDeclaration::new().width(Sizing::fit_range(140.0, f32::MAX)), |ui| {
                ui.leaf(ElementId::new("A.inner"), fixed(150.0, 10.0));
            });
            ui.element(b, ElementDeclaration::new(), |ui| {
                ui.leaf(ElementId::new("B.inner"), fixed(100.0, 10.0));
            });
        });
    });
    assert_eq!(engine.element_bounds(a).map(|r| r.width), Some(140.0));
    assert_eq!(engine.element_bounds(b).map(|r| (r.x, r.width)), Some((140.0, 60.0)));
}

#[test]
fn test_grow_siblings_leave_room_for_gaps() {
    let mut engine = engine(320.0, 100.0);
    let ids = [ElementId::new("G0"), ElementId::new("G1"), ElementId::new("G2")];
    engine.frame(|ui| {
        let row = ElementDeclaration::new().size(Sizing::grow(), Sizing::fixed(40.0)).child_gap(10.0);
        ui.element(ElementId::new("Row"), row, |ui| {
            for id in ids {
                ui.leaf(id, ElementDeclaration::new().size(Sizing::grow(), Sizing::grow()));
            }
        });
    });

    let placed: Vec<(f32, f32)> = ids
        .iter()
        .filter_map(|&id| engine.element_bounds(id))
        .map(|b| (b.x, b.width))
        .collect();
    assert_eq!(placed, vec![(0.0, 100.0), (110.0, 100.0), (220.0, 100.0)]);
}

#[test]
fn test_shrink_counts_gaps_as_overflow() {
    let mut engine = engine(400.0, 100.0);
    let (a, b) = (ElementId::new("A"), ElementId::new("B"));
    engine.frame(|ui| {
        ui.element(ElementId::new("Row"), fixed(200.0, 50.0).child_gap(20.0), |ui| {
            ui.element(a, ElementDeclaration::new(), |ui| {
                ui.leaf(ElementId::new("A.inner"), fixed(150.0, 10.0));
            });
            ui.element(b, ElementDeclaration::new(), |ui| {
                ui.leaf(ElementId::new("B.inner"), fixed(100.0, 10.0));
            });
        });
    });
    // 250 of content plus a 20 gap overflow 200 by 70: A gives 50, then both give 10.
    assert_eq!(engine.element_bounds(a).map(|r| (r.x, r.width)), Some((0.0, 90.0)));
    assert_eq!(engine.element_bounds(b).map(|r| (r.x, r.width)), Some((110.0, 90.0)));
}

#[test]
fn test_alignment_accounts_for_gaps() {
    for (align, first_x) in [(AlignX::Left, 0.0), (AlignX::Center, 40.0), (AlignX::Right, 80.0)] {
        let mut engine = engine(400.0, 100.0);
        let (a, b) = (ElementId::new("A"), ElementId::new("B"));
        engine.frame(|ui| {
            let row = fixed(300.0, 50.0).child_gap(20.0).align_x(align);
            ui.element(ElementId::new("Row"), row, |ui| {
                ui.leaf(a, fixed(100.0, 10.0));
                ui.leaf(b, fixed(100.0, 10.0));
            });
        });
        assert_eq!(engine.element_bounds(a).map(|r| r.x), Some(first_x), "{align:?}");
        assert_eq!(engine.element_bounds(b).map(|r| r.x), Some(first_x + 120.0), "{align:?}");
    }
}

#[test]
fn test_duplicate_id_is_reported() {
    let mut engine = engine(100.0, 100.0);
    let id = ElementId::new("Twice");
    let commands = engine.frame(|ui| {
        ui.leaf(id, fixed(10.0, 10.0));
        ui.leaf(id, fixed(10.0, 10.0));
    });
    assert_eq!(commands.len(), 2);
    assert_eq!(engine.errors(), &[LayoutError::DuplicateId(id)]);
}

#[test]
fn test_unbalanced_close_is_reported() {
    let mut engine = engine(100.0, 100.0);
    engine.frame(|ui| {
        ui.leaf(ElementId::new("A"), fixed(10.0, 10.0));
        ui.close();
    });
    assert_eq!(engine.errors(), &[LayoutError::UnbalancedClose]);
}

#[test]
fn test_unclosed_elements_are_reported() {
    let mut engine = engine(100.0, 100.0);
    let commands = engine.frame(|ui| {
        ui.open(ElementId::new("Open"), fixed(10.0, 10.0));
    });
    assert_eq!(commands.len(), 1);
    assert_eq!(engine.errors(), &[LayoutError::UnclosedElements(1)]);
}

#[test]
fn test_scope_guard_closes_element() {
    let mut engine = engine(200.0, 100.0);
    let after = ElementId::new("After");
    engine.frame(|ui| {
        {
            let mut scope = ui.scope(ElementId::new("Scoped"), fixed(40.0, 40.0));
            scope.leaf(ElementId::new("Inside"), fixed(10.0, 10.0));
        }
        ui.leaf(after, fixed(10.0, 10.0));
    });
    assert!(engine.errors().is_empty());
    assert_eq!(engine.element_bounds(after).map(|b| b.x), Some(40.0));
}

fn sidebar_item(ui: &mut Ui<'_>) {
    ui.auto_element(fixed(20.0, 20.0), |_| {});
}

#[test]
fn test_auto_ids_are_distinct_in_loops() {
    let mut engine = engine(400.0, 400.0);
    let commands = engine.frame(|ui| {
        ui.element(ElementId::new("CardA"), ElementDeclaration::new(), |ui| {
            for _ in 0..5 {
                sidebar_item(ui);
            }
        });
        ui.element(ElementId::new("CardB"), ElementDeclaration::new(), |ui| {
            sidebar_item(ui);
        });
    });

    let mut ids: Vec<ElementId> = commands.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 6);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);
    assert!(engine.errors().is_empty());
}

#[test]
fn test_auto_ids_stable_across_frames() {
    let mut engine = engine(400.0, 400.0);
    let first: Vec<ElementId> = engine
        .frame(|ui| sidebar_item(ui))
        .iter()
        .map(|c| c.id)
        .collect();
    let second: Vec<ElementId> = engine
        .frame(|ui| sidebar_item(ui))
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_offscreen_elements_are_culled() {
    let declare = |ui: &mut Ui<'_>| {
        ui.element(ElementId::new("Strip"), ElementDeclaration::new(), |ui| {
            for i in 0..3 {
                ui.leaf(ElementId::indexed("Tile", i), fixed(80.0, 50.0));
            }
        });
    };

    let mut culled = engine(100.0, 100.0);
    assert_eq!(culled.frame(declare).len(), 2);

    let mut unculled = engine(100.0, 100.0);
    unculled.set_culling(false);
    assert_eq!(unculled.frame(declare).len(), 3);
}

#[test]
fn test_clip_is_inherited() {
    let mut engine = engine(400.0, 400.0);
    let (parent, child, grandchild) = (
        ElementId::new("Viewport"),
        ElementId::new("Content"),
        ElementId::new("Row"),
    );
    let commands = engine.frame(|ui| {
        ui.element(parent, fixed(100.0, 100.0).clip(true), |ui| {
            ui.element(child, fixed(150.0, 50.0), |ui| {
                ui.leaf(grandchild, fixed(120.0, 10.0));
            });
        });
    });

    let clip = Some(Rect::new(0.0, 0.0, 100.0, 100.0));
    let clip_of = |id| commands.for_element(id).next().map(|c| c.clip);
    assert_eq!(clip_of(parent), Some(None));
    assert_eq!(clip_of(child), Some(clip));
    assert_eq!(clip_of(grandchild), Some(clip));
}

#[test]
fn test_border_follows_background() {
    let mut engine = engine(400.0, 400.0);
    let commands = engine.frame(|ui| {
        let framed = fixed(100.0, 100.0).border(BorderConfig::new(Color::BLACK, 2.0));
        ui.element(ElementId::new("Framed"), framed, |ui| {
            ui.leaf(ElementId::new("Inner"), fixed(10.0, 10.0));
        });
    });

    assert!(matches!(commands[0].kind, RenderCommandKind::Rectangle { .. }));
    assert!(matches!(commands[1].kind, RenderCommandKind::Border { .. }));
    assert_eq!(commands[2].id, ElementId::new("Inner"));
}

#[test]
fn test_custom_tag_is_emitted() {
    let mut engine = engine(100.0, 100.0);
    let commands = engine.frame(|ui| {
        ui.leaf(
            ElementId::new("Chart"),
            ElementDeclaration::new().size(Sizing::fixed(10.0), Sizing::fixed(10.0)).custom(7),
        );
    });
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].kind, RenderCommandKind::Custom { tag: 7 });
}

#[test]
fn test_line_height_overrides_measured_height() {
    let mut engine = engine(400.0, 400.0);
    let commands = engine.frame(|ui| {
        ui.text("tall", TextStyle::new(16.0, Color::BLACK).line_height(30.0));
    });
    assert_eq!(commands[0].bounding_box, Rect::new(0.0, 0.0, 40.0, 30.0));
}

#[test]
fn test_missing_measure_function() {
    let mut engine = LayoutEngine::new(Size::new(100.0, 100.0));
    let commands = engine.frame(|ui| {
        ui.text("a", TextStyle::default());
        ui.text("b", TextStyle::default());
    });
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].bounding_box.size(), Size::ZERO);
    assert_eq!(engine.errors(), &[LayoutError::MeasureTextMissing]);
}

#[test]
fn test_capacity_limit() {
    let mut engine = LayoutEngine::with_capacity(Size::new(100.0, 100.0), 2);
    let commands = engine.frame(|ui| {
        for i in 0..3 {
            ui.element(ElementId::indexed("Tile", i), fixed(10.0, 10.0), |ui| {
                ui.leaf(ElementId::indexed("Dot", i), ElementDeclaration::new());
            });
        }
    });
    assert_eq!(commands.len(), 1);
    assert_eq!(engine.errors(), &[LayoutError::CapacityExceeded { max: 2 }]);
}

#[test]
fn test_frames_do_not_carry_state() {
    let mut engine = engine(100.0, 100.0);
    engine.frame(|ui| {
        ui.leaf(ElementId::new("Once"), fixed(10.0, 10.0));
        ui.close();
    });
    assert!(!engine.errors().is_empty());

    let commands = engine.frame(|ui| ui.leaf(ElementId::new("Once"), fixed(10.0, 10.0)));
    assert_eq!(commands.len(), 1);
    assert!(engine.errors().is_empty());
}

#[test]
fn test_resize_changes_root() {
    let mut engine = engine(100.0, 100.0);
    let fill = ElementId::new("Fill");
    let declare = |ui: &mut Ui<'_>| {
        ui.leaf(fill, ElementDeclaration::new().size(Sizing::grow(), Sizing::grow()));
    };
    engine.frame(declare);
    assert_eq!(engine.element_bounds(fill), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

    engine.set_layout_dimensions(Size::new(640.0, 480.0));
    engine.frame(declare);
    assert_eq!(engine.element_bounds(fill), Some(Rect::new(0.0, 0.0, 640.0, 480.0)));
}
