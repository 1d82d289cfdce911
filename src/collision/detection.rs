use crate::math::Vector2D;
use crate::objects::SimulatorObject;
use crate::shapes::{Intersection, Polygon};

use super::manifold::Collision;

/// Number of boundary crossings needed to derive a contact normal.
const CROSSINGS_WANTED: usize = 2;

/// Checks two objects, including their whole subtrees, for contact.
///
/// Both subtrees are flattened (children before parents) and every pair of
/// shaped nodes is tested in that order. The first pair with at least one
/// boundary crossing decides the result; later pairs are never looked at,
/// even if they overlap more deeply.
pub fn collides(a: &SimulatorObject, b: &SimulatorObject) -> Option<Collision> {
    let lefts = a.flatten();
    let rights = b.flatten();

    for left in &lefts {
        let Some(left_shape) = left.shape() else {
            continue;
        };
        for right in &rights {
            let Some(right_shape) = right.shape() else {
                continue;
            };
            let crossings = left_shape.intersections(right_shape, CROSSINGS_WANTED);
            if let Some(collision) = contact_from_crossings(left_shape, &crossings) {
                if crossings.len() == 1 {
                    log::warn!(
                        "single boundary crossing between objects {} and {}; normal is approximate",
                        left.id(),
                        right.id()
                    );
                }
                return Some(collision);
            }
        }
    }
    None
}

/// Builds the contact record from the crossings found on `left`.
///
/// With two crossings the normal is the chord from the lower-alpha crossing
/// to the other one, turned a quarter clockwise. The contact point and
/// boundary coordinates are those of the lower-alpha crossing; the two
/// crossings are not averaged. A single crossing falls back to the edge
/// normal at that point.
fn contact_from_crossings(left: &Polygon, crossings: &[Intersection]) -> Option<Collision> {
    match crossings {
        [] => None,
        [only] => {
            let point = left.point_at(only.alpha)?;
            let normal = left.normal_at(only.alpha)?;
            Some(Collision {
                point,
                normal,
                alpha: only.alpha,
                beta: only.beta,
            })
        }
        [a, b, ..] => {
            let (first, second) = if a.alpha <= b.alpha { (a, b) } else { (b, a) };
            let p1 = left.point_at(first.alpha)?;
            let p2 = left.point_at(second.alpha)?;
            let chord = p2 - p1;
            Some(Collision {
                point: p1,
                normal: Vector2D::new(chord.y, -chord.x).normalize(),
                alpha: first.alpha,
                beta: first.beta,
            })
        }
    }
}
