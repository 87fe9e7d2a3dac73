use super::body::{BodyId, BodyKind};
use crate::relativity::Frame;

/// Axis-aligned bounds of the visible points of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains_x(&self, other: &Extent, tolerance: f64) -> bool {
        other.min_x >= self.min_x - tolerance && other.max_x <= self.max_x + tolerance
    }
}

/// One body as seen at a single observer time.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    pub id: BodyId,
    pub kind: BodyKind,
    pub label: String,
    pub points: Vec<Option<(f64, f64)>>,
    pub segments: Vec<(usize, usize)>,
}

impl BodyView {
    pub fn visible_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().flatten().copied()
    }

    pub fn is_visible(&self) -> bool {
        self.points.iter().any(Option::is_some)
    }

    /// Segments whose two ends both exist right now.
    pub fn visible_segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.segments
            .iter()
            .filter_map(|&(a, b)| Some(((*self.points.get(a)?)?, (*self.points.get(b)?)?)))
    }

    /// Points that are not the end of any segment; drawn as markers.
    pub fn loose_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().enumerate().filter_map(|(i, p)| {
            let joined = self.segments.iter().any(|&(a, b)| a == i || b == i);
            if joined { None } else { *p }
        })
    }

    pub fn extent(&self) -> Option<Extent> {
        let mut points = self.visible_points();
        let (x, y) = points.next()?;
        let start = Extent {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        };
        Some(points.fold(start, |e, (x, y)| Extent {
            min_x: e.min_x.min(x),
            max_x: e.max_x.max(x),
            min_y: e.min_y.min(y),
            max_y: e.max_y.max(y),
        }))
    }
}

/// A marked event that has happened within the flash window.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashView {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Observer time since the event happened.
    pub age: f64,
}

/// Everything visible at one coordinate time of an observer frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub frame: Frame,
    pub bodies: Vec<BodyView>,
    pub flashes: Vec<FlashView>,
}

impl Snapshot {
    pub fn body(&self, id: BodyId) -> Option<&BodyView> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_by_label(&self, label: &str) -> Option<&BodyView> {
        self.bodies.iter().find(|b| b.label == label)
    }

    /// Bounds of everything visible, events included.
    pub fn extent(&self) -> Option<Extent> {
        let flashes = self.flashes.iter().map(|f| Extent {
            min_x: f.x,
            max_x: f.x,
            min_y: f.y,
            max_y: f.y,
        });
        self.bodies
            .iter()
            .filter_map(BodyView::extent)
            .chain(flashes)
            .reduce(|a, b| Extent {
                min_x: a.min_x.min(b.min_x),
                max_x: a.max_x.max(b.max_x),
                min_y: a.min_y.min(b.min_y),
                max_y: a.max_y.max(b.max_y),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(points: Vec<Option<(f64, f64)>>) -> BodyView {
        BodyView {
            id: 0,
            kind: BodyKind::Train,
            label: "train".into(),
            points,
            segments: vec![(0, 1), (1, 2)],
        }
    }

    #[test]
    fn missing_points_drop_their_segments() {
        let v = view(vec![Some((0.0, 0.0)), Some((1.0, 0.0)), None, Some((5.0, 5.0))]);
        assert_eq!(v.visible_segments().count(), 1);
        assert_eq!(v.loose_points().collect::<Vec<_>>(), vec![(5.0, 5.0)]);
        let e = v.extent().unwrap();
        assert_eq!((e.width(), e.height()), (5.0, 5.0));
    }

    #[test]
    fn empty_view_has_no_extent() {
        let v = view(vec![None, None, None]);
        assert!(!v.is_visible());
        assert!(v.extent().is_none());
    }
}
