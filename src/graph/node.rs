use serde::Serialize;

use crate::util::{Color, SYNTHETIC_COLOR, stable_color};

use super::edge::EdgeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

#[derive(Clone, Debug)]
pub struct Node<P> {
    pub index: u32,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub visited: bool,
    pub outgoing: Vec<EdgeId>,
    pub incoming: Vec<EdgeId>,
    pub cluster: Option<ClusterId>,
    pub payload: P,
}

impl<P> Node<P> {
    pub(super) fn new(index: u32, label: String, payload: P) -> Self {
        Self {
            index,
            label,
            x: 0.0,
            y: 0.0,
            color: stable_color(&index),
            visited: false,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            cluster: None,
            payload,
        }
    }

    pub(super) fn synthetic(index: u32, x: f64, y: f64, label: String, payload: P) -> Self {
        Self {
            x,
            y,
            color: SYNTHETIC_COLOR,
            ..Self::new(index, label, payload)
        }
    }

    pub fn degree(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}
