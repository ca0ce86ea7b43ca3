//! Cable routing.
//!
//! Three independent routers read the topology and the finished layout and
//! each produce an ordered, append-only [`Route`] of segments and count
//! labels:
//!
//! - `utp`: device icons → their switch, through one trunk per device kind
//! - `fiber`: root switches → the same switch kind in every branch tower
//! - `power`: the root UPS → every other switch
//!
//! Routers never write to the coordinate index. A connection whose end
//! point has no coordinate is dropped whole; no partial segment is emitted.

pub mod fiber;
pub mod power;
pub mod utp;

use crate::config::Config;
use crate::layout::{Layout, Point};
use crate::topology::Topology;
use serde::Serialize;

pub use fiber::{backbone_kinds, route_fiber};
pub use power::route_power;
pub use utp::route_utp;

/// Cable class of a routed segment; selects its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CableClass {
    Utp,
    Fiber,
    Power,
}

/// Text justification understood by the target editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Justification {
    /// Centered on the baseline.
    Center,
    /// Centered horizontally and vertically.
    MiddleCenter,
    /// Right-aligned, centered vertically.
    MiddleRight,
}

impl Justification {
    pub fn code(self) -> &'static str {
        match self {
            Justification::Center => "C",
            Justification::MiddleCenter => "MC",
            Justification::MiddleRight => "MR",
        }
    }
}

/// An ordered polyline of at least two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedSegment {
    pub class: CableClass,
    pub points: Vec<Point>,
}

/// A cable count annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub anchor: Point,
    pub height: f64,
    pub justification: Justification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RouteItem {
    Segment(RoutedSegment),
    Label(Label),
}

/// Output of one router, in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub class: CableClass,
    items: Vec<RouteItem>,
}

impl Route {
    pub fn new(class: CableClass) -> Self {
        Self {
            class,
            items: Vec::new(),
        }
    }

    /// Append a polyline. Degenerate input (fewer than two points) is ignored.
    pub fn segment(&mut self, points: Vec<Point>) {
        if points.len() < 2 {
            return;
        }
        self.items.push(RouteItem::Segment(RoutedSegment {
            class: self.class,
            points,
        }));
    }

    /// Append a straight line.
    pub fn line(&mut self, from: Point, to: Point) {
        self.segment(vec![from, to]);
    }

    /// Append a baseline-centered label.
    pub fn label(&mut self, text: String, anchor: Point, height: f64) {
        self.items.push(RouteItem::Label(Label {
            text,
            anchor,
            height,
            justification: Justification::Center,
        }));
    }

    pub fn items(&self) -> &[RouteItem] {
        &self.items
    }

    pub fn segments(&self) -> impl Iterator<Item = &RoutedSegment> {
        self.items.iter().filter_map(|item| match item {
            RouteItem::Segment(segment) => Some(segment),
            RouteItem::Label(_) => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().filter_map(|item| match item {
            RouteItem::Label(label) => Some(label),
            RouteItem::Segment(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Run the three routers in drawing order: UTP, fiber, power.
pub fn route_all(topology: &Topology, layout: &Layout, config: &Config) -> Vec<Route> {
    vec![
        route_utp(topology, layout, config),
        route_fiber(topology, layout, config),
        route_power(topology, layout, config),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;

    #[test]
    fn test_route_all_runs_in_drawing_order() {
        let config = Config::default();
        let topology = fixtures::two_branch_wifi();
        let layout = compute_layout(&topology, &config);

        let routes = route_all(&topology, &layout, &config);
        let classes: Vec<CableClass> = routes.iter().map(|r| r.class).collect();
        assert_eq!(classes, vec![CableClass::Utp, CableClass::Fiber, CableClass::Power]);
        assert!(routes.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_route_keeps_order_and_drops_degenerate_segments() {
        let mut route = Route::new(CableClass::Fiber);
        route.line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        route.segment(vec![Point::new(5.0, 5.0)]);
        route.label("1xFO WIFI".to_string(), Point::new(5.0, 10.0), 10.0);

        assert_eq!(route.items().len(), 2);
        assert!(matches!(route.items()[0], RouteItem::Segment(_)));
        assert_eq!(route.segments().next().unwrap().class, CableClass::Fiber);
        assert_eq!(route.labels().next().unwrap().justification.code(), "C");
    }
}
