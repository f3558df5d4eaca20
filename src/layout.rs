//! Space negotiation between components sharing the layout rectangle.
//!
//! Components claim strips off the edges of a shrinking `remaining` rectangle.
//! Once every claim is in, [`LayoutNegotiator::finalize_rects`] stretches axis
//! strips so they sit flush against the final data area.

use crate::data_types::{AxisSide, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RequesterKind {
    Axis,
    Other,
}

#[derive(Clone, Debug)]
struct Claim {
    requester: String,
    side: AxisSide,
    kind: RequesterKind,
    rect: Rect,
}

#[derive(Clone, Debug)]
pub struct LayoutNegotiator {
    layout_rect: Rect,
    remaining: Rect,
    quota: f64,
    claims: Vec<Claim>,
    finalized: bool,
}

impl LayoutNegotiator {
    pub const DEFAULT_QUOTA: f64 = 0.2;

    /// `layout_rect` is the surface rectangle with padding already removed.
    pub fn new(layout_rect: Rect, quota: f64) -> Self {
        Self {
            layout_rect,
            remaining: layout_rect,
            quota: quota.clamp(0.0, 1.0),
            claims: Vec::new(),
            finalized: false,
        }
    }

    pub fn layout_rect(&self) -> Rect {
        self.layout_rect
    }

    pub fn remaining(&self) -> Rect {
        self.remaining
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Claims a strip for a non-axis requester.
    pub fn claim_space(&mut self, requester: &str, side: AxisSide, amount: f64) -> Rect {
        self.claim(requester, side, amount, RequesterKind::Other)
    }

    /// Claims a strip for an axis; it is stretched to the data area on finalize.
    pub fn claim_axis_space(&mut self, requester: &str, side: AxisSide, amount: f64) -> Rect {
        self.claim(requester, side, amount, RequesterKind::Axis)
    }

    fn claim(&mut self, requester: &str, side: AxisSide, amount: f64, kind: RequesterKind) -> Rect {
        let r = self.remaining;
        let limit = match side {
            AxisSide::Top | AxisSide::Bottom => (self.layout_rect.height * self.quota).min(r.height),
            AxisSide::Left | AxisSide::Right => (self.layout_rect.width * self.quota).min(r.width),
            AxisSide::Float => 0.0,
        };
        // NaN and negative requests collapse to zero
        let amount = if amount > 0.0 { amount.min(limit) } else { 0.0 };

        let rect = match side {
            AxisSide::Top => {
                self.remaining.y += amount;
                self.remaining.height -= amount;
                Rect::new(r.x, r.y, r.width, amount)
            }
            AxisSide::Bottom => {
                self.remaining.height -= amount;
                Rect::new(r.x, r.bottom() - amount, r.width, amount)
            }
            AxisSide::Left => {
                self.remaining.x += amount;
                self.remaining.width -= amount;
                Rect::new(r.x, r.y, amount, r.height)
            }
            AxisSide::Right => {
                self.remaining.width -= amount;
                Rect::new(r.right() - amount, r.y, amount, r.height)
            }
            AxisSide::Float => r,
        };

        tracing::trace!(requester, ?side, amount, "space claimed");
        let claim = Claim {
            requester: requester.to_string(),
            side,
            kind,
            rect,
        };
        match self.claims.iter_mut().find(|c| c.requester == requester) {
            Some(existing) => *existing = claim,
            None => self.claims.push(claim),
        }
        rect
    }

    /// Aligns axis strips with the final remaining rectangle.
    pub fn finalize_rects(&mut self) {
        let remaining = self.remaining;
        for claim in self.claims.iter_mut().filter(|c| c.kind == RequesterKind::Axis) {
            match claim.side {
                AxisSide::Top | AxisSide::Bottom => {
                    claim.rect.x = remaining.x;
                    claim.rect.width = remaining.width;
                }
                AxisSide::Left | AxisSide::Right => {
                    claim.rect.y = remaining.y;
                    claim.rect.height = remaining.height;
                }
                AxisSide::Float => claim.rect = remaining,
            }
        }
        self.finalized = true;
    }

    /// The requester's allocation, or the remaining rectangle if it never claimed.
    pub fn rect_for(&self, requester: &str) -> Rect {
        self.claims
            .iter()
            .find(|c| c.requester == requester)
            .map(|c| c.rect)
            .unwrap_or(self.remaining)
    }

    pub fn has_claim(&self, requester: &str) -> bool {
        self.claims.iter().any(|c| c.requester == requester)
    }
}
