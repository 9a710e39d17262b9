//! Object class registration (SPEC_FULL.md §4.3).

use crate::{cstring, ffi, raw_error, AerResult};

/// Builds and registers a new object class, legal only during a mod's
/// `register_objects` callback. Mirrors the VM's own object-creation
/// fields; every flag defaults to the VM's usual baseline (visible,
/// collidable, not persistent, no parent/sprite/mask).
pub struct ObjectBuilder<'a> {
    name: &'a str,
    parent: i32,
    sprite: i32,
    mask: i32,
    depth: i32,
    visible: bool,
    collisions: bool,
    persistent: bool,
}

impl<'a> ObjectBuilder<'a> {
    /// Starts a new object class named `name`.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            parent: -1,
            sprite: -1,
            mask: -1,
            depth: 0,
            visible: true,
            collisions: true,
            persistent: false,
        }
    }

    /// Sets the parent object class this one inherits unhandled events
    /// from.
    pub fn parent(mut self, object_index: u32) -> Self {
        self.parent = object_index as i32;
        self
    }

    /// Sets the default sprite.
    pub fn sprite(mut self, sprite_index: i32) -> Self {
        self.sprite = sprite_index;
        self
    }

    /// Sets the collision mask sprite, defaulting to the object's own
    /// sprite if left unset.
    pub fn mask(mut self, mask_index: i32) -> Self {
        self.mask = mask_index;
        self
    }

    /// Sets the draw depth.
    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets whether instances of this class are visible by default.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets whether instances of this class participate in collisions.
    pub fn collisions(mut self, collisions: bool) -> Self {
        self.collisions = collisions;
        self
    }

    /// Sets whether instances of this class survive room changes.
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Registers the class and returns its new object index.
    pub fn register(self) -> AerResult<u32> {
        let name = cstring(self.name)?;
        let index = unsafe {
            ffi::aer_register_object(
                name.as_ptr(),
                self.parent,
                self.sprite,
                self.mask,
                self.depth,
                self.visible as i32,
                self.collisions as i32,
                self.persistent as i32,
            )
        };
        if index < 0 {
            Err(raw_error())
        } else {
            Ok(index as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_vm_baseline() {
        let builder = ObjectBuilder::new("obj_test");
        assert_eq!(builder.parent, -1);
        assert!(builder.visible);
        assert!(builder.collisions);
        assert!(!builder.persistent);
    }
}
