//! Overlap detection with begin/end contact messages.
//!
//! Every entity with a [`Hitbox`] and [`Tags`] takes part. Pairs are tested
//! once per frame after physics; a pair that starts overlapping produces a
//! [`CollisionBegan`], one that stops produces a [`CollisionEnded`].

use bevy::prelude::*;
use hashbrown::HashSet;
use log::trace;

use crate::components::{CollisionIgnore, Hitbox, Position, Solid, Tags};
use crate::physics::Aabb;

/// Two entities started overlapping. `a` sorts before `b`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionBegan {
    pub a: Entity,
    pub b: Entity,
}

/// Two entities stopped overlapping, or one of them left the world.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEnded {
    pub a: Entity,
    pub b: Entity,
}

/// Common access to the two sides of a contact message.
pub trait ContactPair {
    fn pair(&self) -> (Entity, Entity);

    /// Both orderings, for matching "x touches y" without caring which is `a`.
    fn orderings(&self) -> [(Entity, Entity); 2] {
        let (a, b) = self.pair();
        [(a, b), (b, a)]
    }
}

impl ContactPair for CollisionBegan {
    fn pair(&self) -> (Entity, Entity) {
        (self.a, self.b)
    }
}

impl ContactPair for CollisionEnded {
    fn pair(&self) -> (Entity, Entity) {
        (self.a, self.b)
    }
}

/// Pairs overlapping at the end of the previous detection pass.
#[derive(Resource, Debug, Default)]
pub struct ActiveContacts {
    pairs: HashSet<(Entity, Entity)>,
}

impl ActiveContacts {
    #[must_use]
    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.pairs.contains(&ordered(a, b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Forgets every contact without emitting end messages.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

const fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
    if a.to_bits() <= b.to_bits() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Whether two tagged participants are allowed to touch.
#[must_use]
pub fn may_collide(
    a_tags: Tags,
    a_ignore: Option<&CollisionIgnore>,
    b_tags: Tags,
    b_ignore: Option<&CollisionIgnore>,
) -> bool {
    let a_skips = a_ignore.is_some_and(|ignore| ignore.0.intersects(b_tags));
    let b_skips = b_ignore.is_some_and(|ignore| ignore.0.intersects(a_tags));
    !(a_skips || b_skips)
}

type Participant<'a> = (
    Entity,
    &'a Position,
    &'a Hitbox,
    &'a Tags,
    Option<&'a CollisionIgnore>,
    Has<Solid>,
);

/// Diffs the current overlaps against [`ActiveContacts`] and writes the
/// begin and end messages in a stable order.
pub fn detect_collisions_system(
    participants: Query<Participant<'_>>,
    mut contacts: ResMut<ActiveContacts>,
    mut began: MessageWriter<CollisionBegan>,
    mut ended: MessageWriter<CollisionEnded>,
) {
    let mut bodies: Vec<_> = participants
        .iter()
        .map(|(entity, position, hitbox, tags, ignore, solid)| {
            (entity, Aabb::from_hitbox(position.0, hitbox), *tags, ignore, solid)
        })
        .collect();
    bodies.sort_by_key(|body| body.0.to_bits());

    let mut current = HashSet::new();
    let mut fresh = Vec::new();
    for (i, first) in bodies.iter().enumerate() {
        for second in bodies.iter().skip(i + 1) {
            let (a, a_box, a_tags, a_ignore, a_solid) = first;
            let (b, b_box, b_tags, b_ignore, b_solid) = second;
            if *a_solid && *b_solid {
                continue;
            }
            if !may_collide(*a_tags, *a_ignore, *b_tags, *b_ignore) {
                continue;
            }
            if a_box.overlaps(b_box) {
                let pair = ordered(*a, *b);
                if !contacts.pairs.contains(&pair) {
                    fresh.push(pair);
                }
                current.insert(pair);
            }
        }
    }

    let mut gone: Vec<_> = contacts.pairs.difference(&current).copied().collect();
    gone.sort_by_key(|(a, b)| (a.to_bits(), b.to_bits()));
    for (a, b) in gone {
        trace!("contact ended: {a} / {b}");
        ended.write(CollisionEnded { a, b });
    }
    for (a, b) in fresh {
        trace!("contact began: {a} / {b}");
        began.write(CollisionBegan { a, b });
    }
    contacts.pairs = current;
}
