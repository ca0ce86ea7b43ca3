//! Drawing primitives and the ordered stream that holds them.

use crate::config::LayerStyle;
use crate::layout::Point;
use crate::routing::Justification;

/// One drawing directive, in the vocabulary of the target editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Create a layer with its color.
    CreateLayer { name: String, color: u8 },
    /// Make a layer and color current for everything that follows.
    SelectLayer { name: String, color: u8 },
    Line { from: Point, to: Point },
    Polyline { points: Vec<Point>, closed: bool },
    Circle { center: Point, radius: f64 },
    Text {
        anchor: Point,
        height: f64,
        justification: Justification,
        text: String,
    },
    /// Fill the last drawn closed region.
    Hatch,
    /// Start of a named block of output; carries no geometry.
    Section(String),
}

/// Append-only primitive stream.
///
/// Tracks the current layer so that consecutive shapes on one layer only
/// select it once. Text always goes to the text layer given at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    primitives: Vec<Primitive>,
    text_layer: LayerStyle,
    current: Option<LayerStyle>,
}

impl Drawing {
    pub fn new(text_layer: LayerStyle) -> Self {
        Self {
            primitives: Vec::new(),
            text_layer,
            current: None,
        }
    }

    pub fn section(&mut self, name: &str) {
        self.primitives.push(Primitive::Section(name.to_string()));
    }

    pub fn create_layer(&mut self, layer: &LayerStyle) {
        self.primitives.push(Primitive::CreateLayer {
            name: layer.name.clone(),
            color: layer.color,
        });
    }

    /// Make `layer` current unless it already is.
    pub fn select(&mut self, layer: &LayerStyle) {
        if self.current.as_ref() == Some(layer) {
            return;
        }
        self.primitives.push(Primitive::SelectLayer {
            name: layer.name.clone(),
            color: layer.color,
        });
        self.current = Some(layer.clone());
    }

    pub fn line(&mut self, from: Point, to: Point) {
        self.primitives.push(Primitive::Line { from, to });
    }

    pub fn polyline(&mut self, points: Vec<Point>, closed: bool) {
        self.primitives.push(Primitive::Polyline { points, closed });
    }

    /// Axis-aligned rectangle through two opposite corners.
    pub fn rectangle(&mut self, a: Point, b: Point) {
        self.polyline(
            vec![a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)],
            true,
        );
    }

    pub fn circle(&mut self, center: Point, radius: f64) {
        self.primitives.push(Primitive::Circle { center, radius });
    }

    pub fn hatch(&mut self) {
        self.primitives.push(Primitive::Hatch);
    }

    /// Text on the text layer.
    pub fn text(&mut self, anchor: Point, height: f64, justification: Justification, text: impl Into<String>) {
        let layer = self.text_layer.clone();
        self.select(&layer);
        self.primitives.push(Primitive::Text {
            anchor,
            height,
            justification,
            text: text.into(),
        });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
