//! Demo layouts.
//!
//! `sidebar` is a fixed-width sidebar holding a profile card, five repeated
//! items and a growing content panel. `banner` is a single label in a
//! fit-sized red column; it is what the demo binary shows by default.

use crate::layout::{AlignY, ElementDeclaration, ElementId, LayoutDirection, Sizing, Ui};
use crate::primitives::Color;
use crate::text::TextStyle;

pub const COLOR_LIGHT: Color = Color::rgb(224, 215, 210);
pub const COLOR_RED: Color = Color::rgb(168, 66, 28);
pub const COLOR_ORANGE: Color = Color::rgb(225, 138, 50);
pub const COLOR_BACKDROP: Color = Color::rgb(250, 250, 255);

pub const TITLE: &str = "Clay - UI Library";

pub const OUTER_CONTAINER: ElementId = ElementId::new("OuterContainer");
pub const SIDE_BAR: ElementId = ElementId::new("SideBar");
pub const PROFILE_PICTURE_OUTER: ElementId = ElementId::new("ProfilePictureOuter");
pub const PROFILE_PICTURE: ElementId = ElementId::new("ProfilePicture");
pub const MAIN_CONTENT: ElementId = ElementId::new("MainContent");

const SIDEBAR_ITEMS: usize = 5;

fn title_style() -> TextStyle {
    TextStyle::new(24.0, Color::WHITE)
}

/// One sidebar entry. Called repeatedly from the same line, so it relies on
/// automatic ids.
fn sidebar_item(ui: &mut Ui<'_>) {
    let item = ElementDeclaration::new()
        .size(Sizing::grow(), Sizing::fixed(50.0))
        .background(COLOR_ORANGE);
    ui.auto_element(item, |_| {});
}

/// Fixed-width sidebar with flexible main content.
pub fn sidebar_layout(ui: &mut Ui<'_>) {
    let outer = ElementDeclaration::new()
        .size(Sizing::grow(), Sizing::grow())
        .padding_all(16.0)
        .child_gap(16.0)
        .background(COLOR_BACKDROP);
    let sidebar = ElementDeclaration::new()
        .direction(LayoutDirection::TopToBottom)
        .size(Sizing::fixed(300.0), Sizing::grow())
        .padding_all(16.0)
        .child_gap(16.0)
        .background(COLOR_LIGHT);
    let profile = ElementDeclaration::new()
        .width(Sizing::grow())
        .padding_all(16.0)
        .child_gap(16.0)
        .align_y(AlignY::Center)
        .background(COLOR_RED);

    ui.element(OUTER_CONTAINER, outer, |ui| {
        ui.element(SIDE_BAR, sidebar, |ui| {
            ui.element(PROFILE_PICTURE_OUTER, profile, |ui| {
                ui.leaf(
                    PROFILE_PICTURE,
                    ElementDeclaration::new().size(Sizing::fixed(60.0), Sizing::fixed(60.0)),
                );
                ui.text(TITLE, title_style());
            });

            for _ in 0..SIDEBAR_ITEMS {
                sidebar_item(ui);
            }

            ui.leaf(
                MAIN_CONTENT,
                ElementDeclaration::new()
                    .size(Sizing::grow(), Sizing::grow())
                    .background(COLOR_LIGHT),
            );
        });
    });
}

/// A single label in a red column.
pub fn banner_layout(ui: &mut Ui<'_>) {
    let outer = ElementDeclaration::new()
        .size(Sizing::grow(), Sizing::grow())
        .padding_all(16.0)
        .background(COLOR_BACKDROP);
    let column = ElementDeclaration::new()
        .direction(LayoutDirection::TopToBottom)
        .child_gap(16.0)
        .background(COLOR_RED);

    ui.element(OUTER_CONTAINER, outer, |ui| {
        ui.element(SIDE_BAR, column, |ui| {
            ui.text(TITLE, title_style());
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::primitives::{Rect, Size};
    use crate::render::RenderCommandKind;

    fn engine() -> LayoutEngine {
        let mut engine = LayoutEngine::new(Size::new(1280.0, 720.0));
        engine.set_measure_text(|text, style| Size::new(text.len() as f32 * style.font_size * 0.5, style.font_size));
        engine
    }

    #[test]
    fn test_sidebar_geometry() {
        let mut engine = engine();
        let commands = engine.frame(sidebar_layout);

        assert_eq!(commands.bounding_box(OUTER_CONTAINER), Some(Rect::new(0.0, 0.0, 1280.0, 720.0)));
        assert_eq!(commands.bounding_box(SIDE_BAR), Some(Rect::new(16.0, 16.0, 300.0, 688.0)));
        assert_eq!(
            commands.bounding_box(PROFILE_PICTURE_OUTER),
            Some(Rect::new(32.0, 32.0, 268.0, 92.0))
        );
        // Five items of 50 plus six gaps leave 218 of the sidebar's 656 inner height.
        assert_eq!(commands.bounding_box(MAIN_CONTENT), Some(Rect::new(32.0, 470.0, 268.0, 218.0)));
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn test_sidebar_emits_items_in_order() {
        let mut engine = engine();
        let commands = engine.frame(sidebar_layout);

        // The picture has no background, so it draws nothing.
        assert_eq!(commands.for_element(PROFILE_PICTURE).count(), 0);
        assert_eq!(commands.len(), 10);

        let items: Vec<Rect> = commands
            .iter()
            .filter(|command| command.kind == RenderCommandKind::Rectangle { color: COLOR_ORANGE })
            .map(|command| command.bounding_box)
            .collect();
        let tops: Vec<f32> = items.iter().map(|item| item.y).collect();
        assert_eq!(tops, vec![140.0, 206.0, 272.0, 338.0, 404.0]);
        assert!(items.iter().all(|item| item.width == 268.0 && item.height == 50.0));
    }

    #[test]
    fn test_sidebar_text_centered_beside_picture() {
        let mut engine = engine();
        let commands = engine.frame(sidebar_layout);

        let text = commands
            .iter()
            .find(|command| matches!(command.kind, RenderCommandKind::Text { .. }))
            .map(|command| command.bounding_box);
        assert_eq!(text, Some(Rect::new(124.0, 66.0, 204.0, 24.0)));
    }

    #[test]
    fn test_banner_fits_label() {
        let mut engine = engine();
        let commands = engine.frame(banner_layout);

        assert_eq!(commands.len(), 3);
        assert_eq!(commands.bounding_box(SIDE_BAR), Some(Rect::new(16.0, 16.0, 204.0, 24.0)));
        assert_eq!(
            commands[2].kind,
            RenderCommandKind::Text {
                text: TITLE,
                font_id: 0,
                font_size: 24.0,
                color: Color::WHITE,
            }
        );
    }

    #[test]
    fn test_layouts_are_stable_across_frames() {
        let mut engine = engine();
        let first: Vec<_> = engine.frame(sidebar_layout).iter().map(|c| (c.id, c.bounding_box)).collect();
        let second: Vec<_> = engine.frame(sidebar_layout).iter().map(|c| (c.id, c.bounding_box)).collect();
        assert_eq!(first, second);
    }
}
