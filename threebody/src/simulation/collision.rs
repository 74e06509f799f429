//! Pairwise contact check and 1-D elastic velocity correction
//!
//! After every recorded frame one designated pair of bodies is tested for
//! contact. On contact their x-velocities are replaced with the head-on
//! elastic solution; y-velocities and the third body are left alone.

use serde::{Deserialize, Serialize};

use crate::simulation::states::{Body, NVec2, SystemState, N_BODIES};

/// Contact test used by the collision corrector
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPredicate {
    /// `x_a - x_b <= r_a + r_b`
    ///
    /// Not symmetric in the two bodies: any configuration with `x_a < x_b`
    /// counts as contact. Kept to reproduce legacy runs.
    #[serde(rename = "signed")]
    Signed,

    /// `|x_a - x_b| <= r_a + r_b`
    #[default]
    #[serde(rename = "symmetric")]
    Symmetric,

    /// `|p_a - p_b| <= r_a + r_b` using the full 2-D separation
    #[serde(rename = "radial")]
    Radial,
}

/// The slice of a body the corrector needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub position: NVec2,
    pub vx: f64,
    pub radius: f64,
    pub m: f64,
}

/// Whether `a` and `b` touch under `predicate`
pub fn in_contact(a: &Contact, b: &Contact, predicate: CollisionPredicate) -> bool {
    let reach = a.radius + b.radius;
    match predicate {
        CollisionPredicate::Signed => a.position.x - b.position.x <= reach,
        CollisionPredicate::Symmetric => (a.position.x - b.position.x).abs() <= reach,
        CollisionPredicate::Radial => (a.position - b.position).norm() <= reach,
    }
}

/// Post-collision x-velocities of `a` and `b`
///
/// Returns the input velocities unchanged when the bodies are not in
/// contact, or when both are massless.
///
/// # Examples
///
/// ```
/// use nalgebra::Vector2;
/// use threebody::simulation::collision::{resolve_x_collision, CollisionPredicate, Contact};
///
/// let a = Contact { position: Vector2::new(1.0e6, 0.0), vx: 30_000.0, radius: 7.0e6, m: 5.64e24 };
/// let b = Contact { position: Vector2::new(0.0, 0.0), vx: 0.0, radius: 7.0e6, m: 5.64e24 };
///
/// // Equal masses swap their x-velocities
/// let (va, vb) = resolve_x_collision(&a, &b, CollisionPredicate::Symmetric);
/// assert_eq!(va, 0.0);
/// assert!((vb - 30_000.0).abs() < 1e-9);
/// ```
pub fn resolve_x_collision(a: &Contact, b: &Contact, predicate: CollisionPredicate) -> (f64, f64) {
    let total = a.m + b.m;
    if total == 0.0 || !in_contact(a, b, predicate) {
        return (a.vx, b.vx);
    }

    let va = a.vx * (a.m - b.m) / total + 2.0 * b.m * b.vx / total;
    let vb = b.vx * (b.m - a.m) / total + 2.0 * a.m * a.vx / total;
    (va, vb)
}

/// Record of one velocity correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub frame: usize,
    pub t: f64,
    pub bodies: (usize, usize),      // 1-based ids
    pub vx_before: (f64, f64),
    pub vx_after: (f64, f64),
}

/// Collision check bound to one pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionCorrector {
    pub a: usize, // 0-based index of the first body
    pub b: usize, // 0-based index of the second body
    pub predicate: CollisionPredicate,
}

impl CollisionCorrector {
    pub fn new(a: usize, b: usize, predicate: CollisionPredicate) -> Self {
        Self { a, b, predicate }
    }

    fn contact(&self, i: usize, state: &SystemState, bodies: &[Body; N_BODIES]) -> Contact {
        Contact {
            position: state.position(i),
            vx: state.velocity(i).x,
            radius: bodies[i].radius,
            m: bodies[i].m,
        }
    }

    /// Apply the correction to `state`, returning the corrected state and
    /// the event if the velocities changed hands
    pub fn apply(
        &self,
        state: SystemState,
        bodies: &[Body; N_BODIES],
        frame: usize,
    ) -> (SystemState, Option<CollisionEvent>) {
        let ca = self.contact(self.a, &state, bodies);
        let cb = self.contact(self.b, &state, bodies);

        if ca.m + cb.m == 0.0 || !in_contact(&ca, &cb, self.predicate) {
            return (state, None);
        }

        let (va, vb) = resolve_x_collision(&ca, &cb, self.predicate);
        let event = CollisionEvent {
            frame,
            t: state.t,
            bodies: (bodies[self.a].id, bodies[self.b].id),
            vx_before: (ca.vx, cb.vx),
            vx_after: (va, vb),
        };
        let corrected = state.with_velocity_x(self.a, va).with_velocity_x(self.b, vb);
        (corrected, Some(event))
    }
}
