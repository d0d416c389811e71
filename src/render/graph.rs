use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::primitives::{
    CirclePrimitive, LinePrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive,
    RingSectorPrimitive, TextPrimitive,
};

/// Handle a scene renderer hands out for each node it retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawableId(pub u64);

/// Paint order bucket; lower variants draw first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerKind {
    Grid,
    Series,
    Axis,
    Labels,
    Overlay,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Rect(RectPrimitive),
    Polygon(PolygonPrimitive),
    Circle(CirclePrimitive),
    RingSector(RingSectorPrimitive),
    Text(TextPrimitive),
}

impl Drawable {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Polygon(polygon) => polygon.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::RingSector(sector) => sector.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// One drawable tagged with its paint layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub layer: LayerKind,
    pub drawable: Drawable,
}

impl SceneNode {
    #[must_use]
    pub fn new(layer: LayerKind, drawable: Drawable) -> Self {
        Self { layer, drawable }
    }
}

/// Retained set of nodes produced by one draw pass.
///
/// Built from scratch on every redraw and handed to the renderer whole; it is
/// never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawableGraph {
    nodes: Vec<SceneNode>,
}

impl DrawableGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: LayerKind, drawable: Drawable) {
        self.nodes.push(SceneNode::new(layer, drawable));
    }

    pub fn extend(&mut self, other: DrawableGraph) {
        self.nodes.extend(other.nodes);
    }

    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count_in(&self, layer: LayerKind) -> usize {
        self.nodes.iter().filter(|node| node.layer == layer).count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.nodes.iter().filter_map(|node| match &node.drawable {
            Drawable::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.nodes.iter().filter_map(|node| match &node.drawable {
            Drawable::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    /// Validates every node; a graph that fails is never handed to a renderer.
    pub fn validate(&self) -> ChartResult<()> {
        self.nodes
            .iter()
            .try_for_each(|node| node.drawable.validate())
    }

    /// Nodes in paint order; ties keep insertion order.
    #[must_use]
    pub fn into_paint_order(mut self) -> Vec<SceneNode> {
        self.nodes.sort_by_key(|node| node.layer);
        self.nodes
    }
}
