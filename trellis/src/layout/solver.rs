//! Size and position resolution.
//!
//! Runs over the flat pre-order node list, one axis at a time (x, then y):
//!
//! 1. **Fit** (bottom-up, reverse index order): containers wrap their
//!    children plus padding and gaps, clamped to their sizing bounds.
//! 2. **Distribute** (top-down, forward order): percent children take their
//!    share of the parent's inner extent; free space goes to grow children
//!    smallest-first; overflow is taken from fit/grow children largest-first.
//!    On the cross axis grow children fill the inner extent.
//!
//! Positions are then assigned top-down with child alignment, and clip
//! rectangles are inherited from clipping ancestors.

use crate::primitives::Rect;

use super::engine::Node;
use super::length::{LayoutDirection, Sizing};

const EPSILON: f32 = 0.01;
/// Bound on equalization rounds; each round settles at least one child.
const MAX_ROUNDS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of_direction(direction: LayoutDirection) -> Self {
        match direction {
            LayoutDirection::LeftToRight => Axis::X,
            LayoutDirection::TopToBottom => Axis::Y,
        }
    }
}

fn sizing(node: &Node, axis: Axis) -> Sizing {
    match axis {
        Axis::X => node.decl.width,
        Axis::Y => node.decl.height,
    }
}

fn extent(node: &Node, axis: Axis) -> f32 {
    match axis {
        Axis::X => node.size.width,
        Axis::Y => node.size.height,
    }
}

fn set_extent(node: &mut Node, axis: Axis, value: f32) {
    match axis {
        Axis::X => node.size.width = value,
        Axis::Y => node.size.height = value,
    }
}

/// Leading and trailing padding along `axis`.
fn padding(node: &Node, axis: Axis) -> (f32, f32) {
    let p = node.decl.padding;
    match axis {
        Axis::X => (p.left, p.right),
        Axis::Y => (p.top, p.bottom),
    }
}

fn align_factor(node: &Node, axis: Axis) -> f32 {
    match axis {
        Axis::X => node.decl.align_x.factor(),
        Axis::Y => node.decl.align_y.factor(),
    }
}

/// Total gap space between `count` children.
fn gaps(node: &Node, count: usize) -> f32 {
    node.decl.child_gap * count.saturating_sub(1) as f32
}

/// Clamp with `min` winning over `max` when they conflict.
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Resolve sizes, positions and clips for every node.
pub(crate) fn solve(nodes: &mut [Node]) {
    for axis in [Axis::X, Axis::Y] {
        fit_sizes(nodes, axis);
        distribute(nodes, axis);
    }
    place(nodes);
}

fn fit_sizes(nodes: &mut [Node], axis: Axis) {
    for index in (0..nodes.len()).rev() {
        // Text keeps its measured size.
        if nodes[index].is_text() {
            continue;
        }

        let node = &nodes[index];
        let along_main = Axis::of_direction(node.decl.direction) == axis;
        let child_extents = node.children.iter().map(|&child| extent(&nodes[child], axis));
        let content = if along_main {
            child_extents.sum::<f32>() + gaps(node, node.children.len())
        } else {
            child_extents.fold(0.0, f32::max)
        };
        let (lead, trail) = padding(node, axis);
        let wrapped = content + lead + trail;

        let size = match sizing(node, axis) {
            Sizing::Fixed(px) => px,
            Sizing::Fit { min, max } | Sizing::Grow { min, max } => clamp(wrapped, min, max),
            // Needs the parent's size; resolved on the way down.
            Sizing::Percent(_) => 0.0,
        };
        set_extent(&mut nodes[index], axis, size);
    }
}

fn distribute(nodes: &mut [Node], axis: Axis) {
    for index in 0..nodes.len() {
        if nodes[index].is_text() || nodes[index].children.is_empty() {
            continue;
        }

        let children = std::mem::take(&mut nodes[index].children);
        let parent = &nodes[index];
        let (lead, trail) = padding(parent, axis);
        let inner = (extent(parent, axis) - lead - trail).max(0.0);

        if Axis::of_direction(parent.decl.direction) == axis {
            let available = (inner - gaps(parent, children.len())).max(0.0);
            for &child in &children {
                if let Sizing::Percent(fraction) = sizing(&nodes[child], axis) {
                    set_extent(&mut nodes[child], axis, available * fraction);
                }
            }

            let used: f32 = children.iter().map(|&child| extent(&nodes[child], axis)).sum();
            let remaining = available - used;
            if remaining > EPSILON {
                grow_children(nodes, &children, axis, remaining);
            } else if remaining < -EPSILON {
                shrink_children(nodes, &children, axis, -remaining);
            }
        } else {
            for &child in &children {
                let node = &nodes[child];
                let size = match sizing(node, axis) {
                    Sizing::Grow { min, max } => clamp(inner, min, max),
                    Sizing::Percent(fraction) => inner * fraction,
                    Sizing::Fit { min, .. } if !node.is_text() => extent(node, axis).min(inner).max(min),
                    _ => continue,
                };
                set_extent(&mut nodes[child], axis, size);
            }
        }

        nodes[index].children = children;
    }
}

/// Hand `remaining` to grow children, smallest first, so they equalize.
fn grow_children(nodes: &mut [Node], children: &[usize], axis: Axis, mut remaining: f32) {
    let mut growable: Vec<usize> = children
        .iter()
        .copied()
        .filter(|&child| {
            let node = &nodes[child];
            !node.is_text() && sizing(node, axis).is_grow() && extent(node, axis) < sizing(node, axis).max()
        })
        .collect();

    for _ in 0..MAX_ROUNDS {
        if remaining <= EPSILON || growable.is_empty() {
            break;
        }

        let smallest = growable
            .iter()
            .map(|&child| extent(&nodes[child], axis))
            .fold(f32::MAX, f32::min);
        let next = growable
            .iter()
            .map(|&child| extent(&nodes[child], axis))
            .filter(|&size| size > smallest + EPSILON)
            .fold(f32::MAX, f32::min);
        let group: Vec<usize> = growable
            .iter()
            .copied()
            .filter(|&child| extent(&nodes[child], axis) <= smallest + EPSILON)
            .collect();

        let mut step = (next - smallest).min(remaining / group.len() as f32);
        for &child in &group {
            let node = &nodes[child];
            step = step.min(sizing(node, axis).max() - extent(node, axis));
        }
        let step = step.max(0.0);

        for &child in &group {
            let grown = extent(&nodes[child], axis) + step;
            set_extent(&mut nodes[child], axis, grown);
            remaining -= step;
        }

        growable.retain(|&child| {
            let node = &nodes[child];
            extent(node, axis) < sizing(node, axis).max() - EPSILON
        });
    }
}

/// Take `overflow` from fit and grow children, largest first, never below their minimum.
fn shrink_children(nodes: &mut [Node], children: &[usize], axis: Axis, mut overflow: f32) {
    let mut shrinkable: Vec<usize> = children
        .iter()
        .copied()
        .filter(|&child| {
            let node = &nodes[child];
            !node.is_text() && sizing(node, axis).is_shrinkable() && extent(node, axis) > sizing(node, axis).min()
        })
        .collect();

    for _ in 0..MAX_ROUNDS {
        if overflow <= EPSILON || shrinkable.is_empty() {
            break;
        }

        let largest = shrinkable
            .iter()
            .map(|&child| extent(&nodes[child], axis))
            .fold(f32::MIN, f32::max);
        let next = shrinkable
            .iter()
            .map(|&child| extent(&nodes[child], axis))
            .filter(|&size| size < largest - EPSILON)
            .fold(f32::MIN, f32::max);
        let group: Vec<usize> = shrinkable
            .iter()
            .copied()
            .filter(|&child| extent(&nodes[child], axis) >= largest - EPSILON)
            .collect();

        // With no smaller sibling the group may shrink all the way down.
        let gap_to_next = if next == f32::MIN { largest } else { largest - next };
        let mut step = gap_to_next.min(overflow / group.len() as f32);
        for &child in &group {
            let node = &nodes[child];
            step = step.min(extent(node, axis) - sizing(node, axis).min());
        }
        let step = step.max(0.0);

        for &child in &group {
            let shrunk = extent(&nodes[child], axis) - step;
            set_extent(&mut nodes[child], axis, shrunk);
            overflow -= step;
        }

        shrinkable.retain(|&child| {
            let node = &nodes[child];
            extent(node, axis) > sizing(node, axis).min() + EPSILON
        });
    }
}

fn place(nodes: &mut [Node]) {
    for index in 0..nodes.len() {
        if nodes[index].is_text() || nodes[index].children.is_empty() {
            continue;
        }

        let children = std::mem::take(&mut nodes[index].children);
        let parent = &nodes[index];
        let main = Axis::of_direction(parent.decl.direction);
        let cross = match main {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        };

        let child_clip = if parent.decl.clip {
            let bounds = parent.bounding_box();
            Some(match parent.clip {
                Some(clip) => clip
                    .intersection(&bounds)
                    .unwrap_or(Rect::new(bounds.x, bounds.y, 0.0, 0.0)),
                None => bounds,
            })
        } else {
            parent.clip
        };

        let origin = parent.position;
        let start = |axis: Axis| match axis {
            Axis::X => origin.x,
            Axis::Y => origin.y,
        };

        let (main_lead, main_trail) = padding(parent, main);
        let content: f32 =
            children.iter().map(|&child| extent(&nodes[child], main)).sum::<f32>() + gaps(parent, children.len());
        let free = (extent(parent, main) - main_lead - main_trail - content).max(0.0);
        let mut cursor = start(main) + main_lead + free * align_factor(parent, main);

        let (cross_lead, cross_trail) = padding(parent, cross);
        let cross_inner = extent(parent, cross) - cross_lead - cross_trail;
        let cross_start = start(cross) + cross_lead;
        let cross_factor = align_factor(parent, cross);
        let gap = parent.decl.child_gap;

        for &child in &children {
            let node = &mut nodes[child];
            let main_pos = cursor;
            cursor += extent(node, main) + gap;
            let cross_pos = cross_start + (cross_inner - extent(node, cross)).max(0.0) * cross_factor;

            match main {
                Axis::X => {
                    node.position.x = main_pos;
                    node.position.y = cross_pos;
                }
                Axis::Y => {
                    node.position.y = main_pos;
                    node.position.x = cross_pos;
                }
            }
            node.clip = child_clip;
        }

        nodes[index].children = children;
    }
}
