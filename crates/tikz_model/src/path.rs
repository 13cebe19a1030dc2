//! Path - edges, curves and ellipses between positions

use crate::{Entity, EntityType, MetaPos, ModelError, Result, Uid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Straight line, `--`
    Line,
    /// Horizontal then vertical, `-|`
    HVLine,
    /// Vertical then horizontal, `|-`
    VHLine,
    /// `to[bend left/right]`
    BendCurve,
    /// `to[out=, in=]`
    InOutCurve,
    /// `.. controls .. and ..`
    BezierCurve,
    Ellipse,
    Rectangle,
    Grid,
}

impl PathKind {
    pub const ALL: [PathKind; 9] = [
        PathKind::Line,
        PathKind::HVLine,
        PathKind::VHLine,
        PathKind::BendCurve,
        PathKind::InOutCurve,
        PathKind::BezierCurve,
        PathKind::Ellipse,
        PathKind::Rectangle,
        PathKind::Grid,
    ];

    /// Canonical name in the persisted file
    pub fn as_str(self) -> &'static str {
        match self {
            PathKind::Line => "line",
            PathKind::HVLine => "hv-line",
            PathKind::VHLine => "vh-line",
            PathKind::BendCurve => "bend-curve",
            PathKind::InOutCurve => "in-out-curve",
            PathKind::BezierCurve => "bezier-curve",
            PathKind::Ellipse => "ellipse",
            PathKind::Rectangle => "rectangle",
            PathKind::Grid => "grid",
        }
    }

    /// Whether the path runs from a start to an end position
    pub fn is_edge(self) -> bool {
        !matches!(self, PathKind::Ellipse)
    }

    /// Endpoints carried by a path of this kind
    pub fn endpoints(self) -> &'static [PathEndpoint] {
        match self {
            PathKind::Ellipse => &[PathEndpoint::Center],
            PathKind::BezierCurve => &[
                PathEndpoint::Start,
                PathEndpoint::End,
                PathEndpoint::Control1,
                PathEndpoint::Control2,
            ],
            _ => &[PathEndpoint::Start, PathEndpoint::End],
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        PathKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::InvalidValue(format!("unknown path type '{}'", s)))
    }
}

/// Named position slot of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathEndpoint {
    Start,
    End,
    Control1,
    Control2,
    Center,
}

impl PathEndpoint {
    /// Key used in the persisted file
    pub fn key(self) -> &'static str {
        match self {
            PathEndpoint::Start => "start",
            PathEndpoint::End => "end",
            PathEndpoint::Control1 => "control1",
            PathEndpoint::Control2 => "control2",
            PathEndpoint::Center => "center",
        }
    }
}

/// Position data by path family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathData {
    Edge {
        start: MetaPos,
        end: MetaPos,
    },
    Bezier {
        start: MetaPos,
        end: MetaPos,
        control1: MetaPos,
        control2: MetaPos,
    },
    Ellipse {
        center: MetaPos,
    },
}

impl PathData {
    fn for_kind(kind: PathKind) -> Self {
        match kind {
            PathKind::Ellipse => PathData::Ellipse {
                center: MetaPos::default(),
            },
            PathKind::BezierCurve => PathData::Bezier {
                start: MetaPos::default(),
                end: MetaPos::default(),
                control1: MetaPos::default(),
                control2: MetaPos::default(),
            },
            _ => PathData::Edge {
                start: MetaPos::default(),
                end: MetaPos::default(),
            },
        }
    }
}

/// A path in the diagram. Its edge style shares the path's uid.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    uid: Uid,
    kind: PathKind,
    data: PathData,
}

impl Path {
    pub(crate) fn new(uid: Uid, kind: PathKind) -> Self {
        Self {
            uid,
            kind,
            data: PathData::for_kind(kind),
        }
    }

    pub fn id(&self) -> i64 {
        self.uid.id()
    }

    pub fn kind(&self) -> PathKind {
        self.kind
    }

    pub fn data(&self) -> &PathData {
        &self.data
    }

    /// Uid of this path's style
    pub fn style_uid(&self) -> Uid {
        self.uid
    }

    pub fn endpoint(&self, endpoint: PathEndpoint) -> Option<&MetaPos> {
        match (&self.data, endpoint) {
            (PathData::Edge { start, .. }, PathEndpoint::Start)
            | (PathData::Bezier { start, .. }, PathEndpoint::Start) => Some(start),
            (PathData::Edge { end, .. }, PathEndpoint::End)
            | (PathData::Bezier { end, .. }, PathEndpoint::End) => Some(end),
            (PathData::Bezier { control1, .. }, PathEndpoint::Control1) => Some(control1),
            (PathData::Bezier { control2, .. }, PathEndpoint::Control2) => Some(control2),
            (PathData::Ellipse { center }, PathEndpoint::Center) => Some(center),
            _ => None,
        }
    }

    pub(crate) fn endpoint_mut(&mut self, endpoint: PathEndpoint) -> Result<&mut MetaPos> {
        let kind = self.kind;
        match (&mut self.data, endpoint) {
            (PathData::Edge { start, .. }, PathEndpoint::Start)
            | (PathData::Bezier { start, .. }, PathEndpoint::Start) => Ok(start),
            (PathData::Edge { end, .. }, PathEndpoint::End)
            | (PathData::Bezier { end, .. }, PathEndpoint::End) => Ok(end),
            (PathData::Bezier { control1, .. }, PathEndpoint::Control1) => Ok(control1),
            (PathData::Bezier { control2, .. }, PathEndpoint::Control2) => Ok(control2),
            (PathData::Ellipse { center }, PathEndpoint::Center) => Ok(center),
            _ => Err(ModelError::InvalidEndpoint {
                kind,
                endpoint: endpoint.key(),
            }),
        }
    }

    /// All endpoints of this path with their slot names
    pub fn endpoints(&self) -> impl Iterator<Item = (PathEndpoint, &MetaPos)> + '_ {
        self.kind
            .endpoints()
            .iter()
            .filter_map(move |e| self.endpoint(*e).map(|meta| (*e, meta)))
    }

    /// Whether any endpoint is attached to `node`
    pub fn references_node(&self, node: Uid) -> bool {
        self.endpoints().any(|(_, meta)| meta.node() == Some(node))
    }

    pub fn start(&self) -> Option<&MetaPos> {
        self.endpoint(PathEndpoint::Start)
    }

    pub fn end(&self) -> Option<&MetaPos> {
        self.endpoint(PathEndpoint::End)
    }

    pub fn center(&self) -> Option<&MetaPos> {
        self.endpoint(PathEndpoint::Center)
    }
}

impl Entity for Path {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn entity_type(&self) -> EntityType {
        EntityType::Path
    }
}
