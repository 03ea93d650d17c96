//! Collision System
//!
//! Circle entities against axis-aligned ground rectangles, plus the
//! player/enemy contact rules. Ground resolution pushes the entity out
//! along the axis of least penetration.

use super::enemy::Enemy;
use super::entity::Entity;
use super::geometry::Circle;
use super::ground::Ground;
use super::player::Player;

/// Above this scale, eating an enemy earns a bomb instead of growth
pub const MAX_GROWTH_FROM_KILLS: f32 = 4.0;

/// Which side of the other shape was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Result of a ground collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub side: CollisionSide,
    pub penetration_depth: f32,
    /// Index into the ground slice
    pub ground: usize,
}

/// Penetration of the entity into the first ground it overlaps
pub fn ground_collision_info(bounds: &Circle, grounds: &[Ground]) -> Option<CollisionInfo> {
    let (index, ground) = grounds
        .iter()
        .enumerate()
        .find(|(_, g)| g.collides_with_circle(bounds))?;
    let rect = ground.bounds();

    let overlap_left = bounds.right() - rect.x;
    let overlap_right = rect.right() - bounds.left();
    let overlap_top = bounds.bottom() - rect.y;
    let overlap_bottom = rect.bottom() - bounds.top();

    let (side, penetration_depth) = if overlap_left.min(overlap_right) < overlap_top.min(overlap_bottom) {
        if overlap_left < overlap_right {
            (CollisionSide::Left, overlap_left)
        } else {
            (CollisionSide::Right, overlap_right)
        }
    } else if overlap_top < overlap_bottom {
        (CollisionSide::Top, overlap_top)
    } else {
        (CollisionSide::Bottom, overlap_bottom)
    };

    Some(CollisionInfo { side, penetration_depth, ground: index })
}

/// Push `entity` out of the grounds it overlaps.
///
/// Landing and head bumps only apply when the vertical velocity points into
/// the surface. With `clamp_to_surface` set (the player), an entity still
/// sinking below the hit ground's top edge afterwards is snapped onto it.
pub fn resolve_ground_collision(entity: &mut Entity, grounds: &[Ground], clamp_to_surface: bool) -> Option<CollisionInfo> {
    if entity.can_phase() {
        return None;
    }

    let Some(info) = ground_collision_info(&entity.bounds(), grounds) else {
        entity.set_on_ground(false);
        return None;
    };
    let rect = grounds[info.ground].bounds();
    let r = entity.radius();

    match info.side {
        CollisionSide::Top => {
            if entity.velocity_y() > 0.0 {
                entity.set_on_ground(true);
                entity.set_velocity_y(0.0);
                entity.set_y(rect.y - r);
            }
        }
        CollisionSide::Left => entity.set_x(rect.x - r),
        CollisionSide::Right => entity.set_x(rect.right() + r),
        CollisionSide::Bottom => {
            if entity.velocity_y() < 0.0 {
                entity.set_velocity_y(0.0);
                entity.set_y(rect.bottom() + r);
            }
        }
    }

    if clamp_to_surface && entity.y() + r > rect.y {
        entity.set_y(rect.y - r);
        entity.set_velocity_y(0.0);
        entity.set_on_ground(true);
    }

    Some(info)
}

/// Side of `first` that `second` touches.
///
/// `hardness` scales the vertical component: lower values favour
/// horizontal classification.
pub fn collision_side(first: &Circle, second: &Circle, hardness: f32) -> CollisionSide {
    let dx = second.center.x - first.center.x;
    let dy = second.center.y - first.center.y;

    if dx.abs() > dy.abs() * hardness {
        if dx > 0.0 {
            CollisionSide::Right
        } else {
            CollisionSide::Left
        }
    } else if dy > 0.0 {
        CollisionSide::Bottom
    } else {
        CollisionSide::Top
    }
}

/// What happened when the player touched an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Side hit: the enemy is eaten and must be removed
    Eaten,
    /// Enemy landed on the player
    Stomped,
    /// Touching, but from below
    Bump,
}

/// Apply the player/enemy contact rules, if the two overlap.
pub fn resolve_enemy_contact(player: &mut Player, enemy: &mut Enemy, hardness: f32) -> Option<Contact> {
    let pb = player.entity().bounds();
    let eb = enemy.entity().bounds();
    if !pb.overlaps(&eb) {
        return None;
    }

    let contact = match collision_side(&pb, &eb, hardness) {
        CollisionSide::Left | CollisionSide::Right => {
            player.increment_kill_count();
            if player.size_scale() < MAX_GROWTH_FROM_KILLS {
                player.grow_larger();
            } else if !player.can_use_bomb() {
                player.enable_bomb();
            }
            Contact::Eaten
        }
        CollisionSide::Top => {
            player.take_damage();
            enemy.entity_mut().jump();
            Contact::Stomped
        }
        CollisionSide::Bottom => Contact::Bump,
    };
    Some(contact)
}
